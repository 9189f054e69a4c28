//! Scroll/Fetch Scheduler (component E): scroll-position bookkeeping, visible/render/retention
//! range computation, and the fetch-window decision, all driven by host-supplied frame ticks.

use crate::data_model::DEFAULT_RETENTION_MULTIPLE;

/// A half-open row range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn contains_range(&self, other: Range) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// A row-window request: `offset`, `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub offset: usize,
    pub limit: usize,
}

/// Default overscan row count, added to each side of the visible range before rendering.
pub const DEFAULT_OVERSCAN: usize = 8;

/// Minimum pad factor applied to the fetch-window band around the render range.
pub const DEFAULT_PAD_FACTOR: f64 = 3.0;

/// Computes the visible row range from scroll position, viewport height, and row height.
/// Idempotent; never returns `end < start`.
pub fn visible_range(scroll_top: f64, viewport_height: f64, row_height: f64, total_rows: usize) -> Range {
    if row_height <= 0.0 {
        return Range::new(0, 0);
    }
    let start = (scroll_top / row_height).floor().max(0.0) as usize;
    let end_raw = ((scroll_top + viewport_height) / row_height).ceil().max(0.0) as usize;
    let start = start.min(total_rows);
    let end = end_raw.min(total_rows);
    Range::new(start, end)
}

/// Expands a visible range by `overscan` rows on each side, clamped to `[0, total_rows]`.
pub fn render_range(visible: Range, overscan: usize, total_rows: usize) -> Range {
    let start = visible.start.saturating_sub(overscan);
    let end = (visible.end + overscan).min(total_rows);
    Range::new(start, end)
}

/// Eviction bounds: `[max(0, start - R), min(total_rows, end + R)]` for retention radius `R`.
pub fn retention_range(visible: Range, radius: usize, total_rows: usize) -> Range {
    let start = visible.start.saturating_sub(radius);
    let end = (visible.end + radius).min(total_rows);
    Range::new(start, end)
}

/// The retention radius for a given fetch limit: a multiple of the limit (default 3x, within the
/// documented 2-3x conservative band).
pub fn retention_radius(fetch_limit: usize) -> usize {
    fetch_limit * DEFAULT_RETENTION_MULTIPLE
}

/// Decides whether a new fetch window should be requested: `true` iff the render range is not
/// fully contained within `current_window`, or no window has yet been requested.
///
/// The new window centers a band of size `max(render.end - render.start, 3 * viewport_rows) * F`
/// around the render range's midpoint, clamped to `[0, total_rows]`, with its offset rounded down
/// to a multiple of `viewport_rows` to reduce churn.
pub fn fetch_window_decision(
    render: Range,
    current_window: Option<FetchWindow>,
    viewport_rows: usize,
    pad_factor: f64,
    total_rows: usize,
) -> Option<FetchWindow> {
    let render_as_window = Range::new(
        current_window.map_or(0, |w| w.offset),
        current_window.map_or(0, |w| w.offset + w.limit),
    );
    let needs_new_window = match current_window {
        None => true,
        Some(_) => !render_as_window.contains_range(render),
    };
    if !needs_new_window {
        return None;
    }

    let band_rows = (render.end - render.start).max(3 * viewport_rows);
    let band = (band_rows as f64 * pad_factor).round() as usize;
    let mid = (render.start + render.end) / 2;
    let half = band / 2;
    let raw_offset = mid.saturating_sub(half);

    let page = viewport_rows.max(1);
    let aligned_offset = (raw_offset / page) * page;
    let offset = aligned_offset.min(total_rows.saturating_sub(1).max(0));
    let limit = band.min(total_rows.saturating_sub(offset));

    Some(FetchWindow { offset, limit })
}

/// Scroll-position bookkeeping and the single-threaded frame-tick scheduling loop. Scroll inputs
/// mutate `scroll_top`/`scroll_left` immediately; a host-driven `tick()` call is what actually
/// recomputes ranges and decides on a new fetch window.
#[derive(Debug)]
pub struct Scheduler {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub overscan: usize,
    pub pad_factor: f64,
    frame_pending: bool,
    current_window: Option<FetchWindow>,
    last_visible: Option<Range>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            overscan: DEFAULT_OVERSCAN,
            pad_factor: DEFAULT_PAD_FACTOR,
            frame_pending: false,
            current_window: None,
            last_visible: None,
        }
    }
}

/// The result of one tick: the recomputed ranges and a new fetch window, if one was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub visible_changed: bool,
    pub visible: Range,
    pub render: Range,
    pub retention: Range,
    pub new_fetch_window: Option<FetchWindow>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll input. Schedules a frame tick if none is already pending; returns
    /// whether this call was the one that scheduled it.
    pub fn on_scroll(&mut self, scroll_top: f64, scroll_left: f64) -> bool {
        self.scroll_top = scroll_top;
        self.scroll_left = scroll_left;
        self.request_tick()
    }

    pub fn request_tick(&mut self) -> bool {
        if self.frame_pending {
            false
        } else {
            self.frame_pending = true;
            true
        }
    }

    /// Runs one frame tick: recomputes visible/render/retention ranges, consults the
    /// fetch-window decision, and clears the pending-frame flag.
    pub fn tick(
        &mut self,
        viewport_height: f64,
        row_height: f64,
        total_rows: usize,
        fetch_limit: usize,
    ) -> TickOutcome {
        self.frame_pending = false;

        let visible = visible_range(self.scroll_top, viewport_height, row_height, total_rows);
        let visible_changed = self.last_visible != Some(visible);
        self.last_visible = Some(visible);

        let render = render_range(visible, self.overscan, total_rows);
        let viewport_rows = if row_height > 0.0 {
            (viewport_height / row_height).ceil() as usize
        } else {
            0
        };

        let new_fetch_window = fetch_window_decision(
            render,
            self.current_window,
            viewport_rows,
            self.pad_factor,
            total_rows,
        );
        if let Some(window) = new_fetch_window {
            self.current_window = Some(window);
        }

        let retention = retention_range(visible, retention_radius(fetch_limit), total_rows);

        TickOutcome {
            visible_changed,
            visible,
            render,
            retention,
            new_fetch_window,
        }
    }

    /// Cancels a pending frame tick, e.g. on unmount.
    pub fn cancel_pending(&mut self) {
        self.frame_pending = false;
    }

    /// Forgets the currently tracked fetch window. Called whenever a sort or filter change
    /// clears the Data Model, so the next `tick()` requests a fresh window instead of trusting
    /// one that described rows under a now-abandoned `(sort, filter)` pair.
    pub fn invalidate_window(&mut self) {
        self.current_window = None;
    }

    /// Sets `scroll_top = i * row_height`, clamped to `[0, total_height - viewport_height]`, and
    /// schedules a tick.
    pub fn scroll_to_row(&mut self, i: usize, row_height: f64, total_rows: usize, viewport_height: f64) {
        let total_height = total_rows as f64 * row_height;
        let max_scroll = (total_height - viewport_height).max(0.0);
        self.scroll_top = (i as f64 * row_height).clamp(0.0, max_scroll);
        self.request_tick();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
        self.request_tick();
    }

    /// Clamps horizontal scroll to `[0, total_width - viewport_width]`.
    pub fn scroll_to_x(&mut self, px: f64, total_width: f64, viewport_width: f64) {
        let max_scroll = (total_width - viewport_width).max(0.0);
        self.scroll_left = px.clamp(0.0, max_scroll);
        self.request_tick();
    }
}
