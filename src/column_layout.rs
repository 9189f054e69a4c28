//! Layout Engine (component B), part 2: resolves an ordered list of column definitions, a
//! container width, and left/right pin assignments into an immutable `ColumnLayout` snapshot.

use crate::schema::TypeCategory;
use crate::units::{resolve, LayoutContext, Unit};
use std::collections::HashMap;

/// Default column width per type category, expressed in rem, applied when a column declares no
/// width (or `auto`) and no flex weight.
fn category_default_rem(category: TypeCategory) -> f64 {
    match category {
        TypeCategory::Boolean => 4.0,
        TypeCategory::Numeric => 7.0,
        TypeCategory::Identifier => 10.0,
        TypeCategory::Temporal => 10.0,
        TypeCategory::Enum => 8.0,
        TypeCategory::Geo => 10.0,
        TypeCategory::Complex => 14.0,
        TypeCategory::Binary => 10.0,
        TypeCategory::Text | TypeCategory::Unknown => 12.0,
    }
}

/// Which of the three horizontal regions a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRegion {
    Left,
    Center,
    Right,
}

/// A column definition as given to the Layout Engine, before resolution.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: String,
    pub category: TypeCategory,
    /// `None` behaves as `Unit::Auto`.
    pub width: Option<Unit>,
    pub min_width: Option<Unit>,
    pub max_width: Option<Unit>,
    /// Present only on flex columns; the proportional weight used in budget distribution.
    pub flex: Option<f64>,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            key: key.into(),
            category,
            width: None,
            min_width: None,
            max_width: None,
            flex: None,
        }
    }
}

/// A fully resolved column: its region, pixel width, and pixel offset within that region.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub key: String,
    pub region: PinRegion,
    pub width: f64,
    pub offset: f64,
}

/// An immutable layout snapshot. Recomputation (a new call to `resolve_layout`) yields a new
/// snapshot rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub columns: Vec<ResolvedColumn>,
    pub total_width: f64,
    pub left_width: f64,
    pub center_width: f64,
    pub right_width: f64,
    pub row_height: f64,
    by_key: HashMap<String, usize>,
}

impl ColumnLayout {
    fn build(columns: Vec<ResolvedColumn>, row_height: f64) -> Self {
        let left_width = region_total(&columns, PinRegion::Left);
        let center_width = region_total(&columns, PinRegion::Center);
        let right_width = region_total(&columns, PinRegion::Right);
        let by_key = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.key.clone(), i))
            .collect();
        Self {
            total_width: left_width + center_width + right_width,
            left_width,
            center_width,
            right_width,
            row_height,
            columns,
            by_key,
        }
    }

    pub fn width_of(&self, key: &str) -> Option<f64> {
        self.by_key.get(key).map(|&i| self.columns[i].width)
    }

    pub fn offset_of(&self, key: &str) -> Option<f64> {
        self.by_key.get(key).map(|&i| self.columns[i].offset)
    }

    pub fn region_of(&self, key: &str) -> Option<PinRegion> {
        self.by_key.get(key).map(|&i| self.columns[i].region)
    }
}

fn region_total(columns: &[ResolvedColumn], region: PinRegion) -> f64 {
    columns
        .iter()
        .filter(|c| c.region == region)
        .map(|c| c.width)
        .sum()
}

fn clamp_min_max(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut v = value.max(0.0);
    if let Some(min) = min {
        v = v.max(min);
    }
    if let Some(max) = max {
        v = v.min(max);
    }
    v
}

struct Slot {
    key: String,
    width: f64,
    flex: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Resolves one region's columns in declaration order. `budget` is `Some(px)` for the
/// budget-capped center region, `None` for left/right (which size to their natural total).
fn layout_region(
    defs: &[&ColumnDef],
    region: PinRegion,
    budget: Option<f64>,
    ctx: &LayoutContext,
) -> Vec<ResolvedColumn> {
    let mut slots: Vec<Slot> = defs
        .iter()
        .map(|def| {
            let min = def.min_width.map(|u| resolve(u, ctx));
            let max = def.max_width.map(|u| resolve(u, ctx));
            if let Some(flex) = def.flex {
                Slot {
                    key: def.key.clone(),
                    width: 0.0,
                    flex: Some(flex),
                    min,
                    max,
                }
            } else {
                let raw = match def.width {
                    Some(Unit::Auto) | None => {
                        resolve(Unit::Rem(category_default_rem(def.category)), ctx)
                    }
                    Some(unit) => resolve(unit, ctx),
                };
                Slot {
                    key: def.key.clone(),
                    width: clamp_min_max(raw, min, max),
                    flex: None,
                    min,
                    max,
                }
            }
        })
        .collect();

    let fixed_sum: f64 = slots.iter().filter(|s| s.flex.is_none()).map(|s| s.width).sum();
    let total_flex_weight: f64 = slots.iter().filter_map(|s| s.flex).sum();
    let remaining = match budget {
        Some(b) => (b - fixed_sum).max(0.0),
        None => 0.0,
    };

    if total_flex_weight > 0.0 {
        let mut clamped_delta = 0.0;
        let mut unclamped: Vec<usize> = Vec::new();

        for (i, slot) in slots.iter_mut().enumerate() {
            if let Some(weight) = slot.flex {
                let share = remaining * (weight / total_flex_weight);
                let clamped = clamp_min_max(share, slot.min, slot.max);
                if (clamped - share).abs() > f64::EPSILON {
                    clamped_delta += share - clamped;
                } else {
                    unclamped.push(i);
                }
                slot.width = clamped;
            }
        }

        if clamped_delta.abs() > f64::EPSILON && !unclamped.is_empty() {
            let unclamped_weight: f64 = unclamped.iter().map(|&i| slots[i].flex.unwrap()).sum();
            for i in unclamped {
                let weight = slots[i].flex.unwrap();
                let extra = clamped_delta * (weight / unclamped_weight);
                let slot = &mut slots[i];
                slot.width = clamp_min_max(slot.width + extra, slot.min, slot.max);
            }
        }
    }

    let mut offset = 0.0;
    let mut out = Vec::with_capacity(slots.len());
    for slot in slots {
        out.push(ResolvedColumn {
            key: slot.key,
            region,
            width: slot.width,
            offset,
        });
        offset += slot.width;
    }
    out
}

/// Resolves the full layout. `left_keys`/`right_keys` give pin assignment in declaration order;
/// columns not named in either belong to the center region, in their original `columns` order.
pub fn resolve_layout(
    columns: &[ColumnDef],
    ctx: &LayoutContext,
    left_keys: &[String],
    right_keys: &[String],
) -> ColumnLayout {
    let by_key: HashMap<&str, &ColumnDef> = columns.iter().map(|c| (c.key.as_str(), c)).collect();

    let left_defs: Vec<&ColumnDef> = left_keys
        .iter()
        .filter_map(|k| by_key.get(k.as_str()).copied())
        .collect();
    let right_defs: Vec<&ColumnDef> = right_keys
        .iter()
        .filter_map(|k| by_key.get(k.as_str()).copied())
        .collect();
    let center_defs: Vec<&ColumnDef> = columns
        .iter()
        .filter(|c| !left_keys.contains(&c.key) && !right_keys.contains(&c.key))
        .collect();

    let left = layout_region(&left_defs, PinRegion::Left, None, ctx);
    let right = layout_region(&right_defs, PinRegion::Right, None, ctx);
    let left_total: f64 = left.iter().map(|c| c.width).sum();
    let right_total: f64 = right.iter().map(|c| c.width).sum();
    let center_budget = (ctx.container_width - left_total - right_total).max(0.0);
    let center = layout_region(&center_defs, PinRegion::Center, Some(center_budget), ctx);

    let mut all = left;
    all.extend(center);
    all.extend(right);

    let row_height = resolve_row_height(1, Unit::Em(1.4), Unit::Em(0.5), ctx);
    ColumnLayout::build(all, row_height)
}

/// Row height: `numLines * lineHeight + padding`, each resolved through the same unit system.
/// Recomputed whenever measurements change, matching the Layout Engine's single-pass contract.
pub fn resolve_row_height(num_lines: u32, line_height: Unit, padding: Unit, ctx: &LayoutContext) -> f64 {
    num_lines as f64 * resolve(line_height, ctx) + resolve(padding, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LayoutContext {
        LayoutContext {
            container_width: 1000.0,
            root_font_size: 16.0,
            table_font_size: 14.0,
        }
    }

    #[test]
    fn auto_column_gets_category_default() {
        let cols = vec![ColumnDef::new("age", TypeCategory::Numeric)];
        let layout = resolve_layout(&cols, &ctx(), &[], &[]);
        assert_eq!(layout.width_of("age"), Some(7.0 * 16.0));
    }

    #[test]
    fn pinned_columns_land_in_correct_regions() {
        let cols = vec![
            ColumnDef::new("id", TypeCategory::Identifier),
            ColumnDef::new("name", TypeCategory::Text),
            ColumnDef::new("flag", TypeCategory::Boolean),
        ];
        let left = vec!["id".to_string()];
        let right = vec!["flag".to_string()];
        let layout = resolve_layout(&cols, &ctx(), &left, &right);
        assert_eq!(layout.region_of("id"), Some(PinRegion::Left));
        assert_eq!(layout.region_of("name"), Some(PinRegion::Center));
        assert_eq!(layout.region_of("flag"), Some(PinRegion::Right));
    }

    #[test]
    fn flex_column_fills_remaining_budget() {
        let mut fixed = ColumnDef::new("id", TypeCategory::Identifier);
        fixed.width = Some(Unit::Px(200.0));
        let mut flexible = ColumnDef::new("description", TypeCategory::Text);
        flexible.flex = Some(1.0);
        let cols = vec![fixed, flexible];
        let layout = resolve_layout(&cols, &ctx(), &[], &[]);
        assert_eq!(layout.width_of("id"), Some(200.0));
        assert_eq!(layout.width_of("description"), Some(800.0));
        assert_eq!(layout.total_width, 1000.0);
    }

    #[test]
    fn flex_clamp_redistributes_to_unclamped_flex_columns() {
        let mut a = ColumnDef::new("a", TypeCategory::Text);
        a.flex = Some(1.0);
        a.max_width = Some(Unit::Px(100.0));
        let mut b = ColumnDef::new("b", TypeCategory::Text);
        b.flex = Some(1.0);
        let cols = vec![a, b];
        let layout = resolve_layout(&cols, &ctx(), &[], &[]);
        assert_eq!(layout.width_of("a"), Some(100.0));
        assert_eq!(layout.width_of("b"), Some(900.0));
    }

    #[test]
    fn zero_container_width_yields_zero_flex_columns_but_valid_fixed() {
        let mut fixed = ColumnDef::new("id", TypeCategory::Identifier);
        fixed.width = Some(Unit::Px(50.0));
        let mut flexible = ColumnDef::new("notes", TypeCategory::Text);
        flexible.flex = Some(1.0);
        let cols = vec![fixed, flexible];
        let zero_ctx = LayoutContext {
            container_width: 0.0,
            ..ctx()
        };
        let layout = resolve_layout(&cols, &zero_ctx, &[], &[]);
        assert_eq!(layout.width_of("id"), Some(50.0));
        assert_eq!(layout.width_of("notes"), Some(0.0));
    }

    #[test]
    fn row_height_default_formula() {
        let layout = resolve_layout(&[], &ctx(), &[], &[]);
        assert_eq!(layout.row_height, 1.4 * 14.0 + 0.5 * 14.0);
    }
}
