//! Unit resolution for the Layout Engine (component B).
//!
//! A `Unit` is a parsed column-size declaration; `resolve` turns it into a pixel value given the
//! surrounding `LayoutContext` (container width, root font size, table font size).

use crate::error::{GridError, GridResult};

/// Sentinel returned by `resolve` for `Unit::Auto`: the caller infers the real width later from
/// the category-default table, not from this function.
pub const AUTO_SENTINEL: f64 = -1.0;

/// A parsed column-size declaration, before resolution against a `LayoutContext`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    Px(f64),
    Percent(f64),
    Rem(f64),
    Em(f64),
    Auto,
}

/// The ambient measurements a `Unit` resolves against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    pub container_width: f64,
    pub root_font_size: f64,
    pub table_font_size: f64,
}

/// Parses a raw column-size string into a `Unit`. Accepts a bare number (pixels), `"Npx"`,
/// `"N%"`, `"Nrem"`, `"Nem"`, or the literal `"auto"`.
pub fn parse_unit(raw: &str) -> GridResult<Unit> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("auto") {
        return Ok(Unit::Auto);
    }
    if let Some(n) = raw.strip_suffix("px") {
        return parse_f64(n, raw).map(Unit::Px);
    }
    if let Some(n) = raw.strip_suffix('%') {
        return parse_f64(n, raw).map(Unit::Percent);
    }
    if let Some(n) = raw.strip_suffix("rem") {
        return parse_f64(n, raw).map(Unit::Rem);
    }
    if let Some(n) = raw.strip_suffix("em") {
        return parse_f64(n, raw).map(Unit::Em);
    }
    parse_f64(raw, raw).map(Unit::Px)
}

fn parse_f64(n: &str, original: &str) -> GridResult<f64> {
    n.trim()
        .parse::<f64>()
        .map_err(|_| GridError::LayoutResolution {
            column: String::new(),
            reason: format!("could not parse unit '{original}'"),
        })
}

/// Resolves a `Unit` to a pixel value. Nonsensical inputs (negative, NaN) clamp to zero per the
/// Layout Engine's documented failure mode; `Unit::Auto` returns the `AUTO_SENTINEL`.
pub fn resolve(unit: Unit, ctx: &LayoutContext) -> f64 {
    let raw = match unit {
        Unit::Px(n) => n,
        Unit::Percent(n) => n / 100.0 * ctx.container_width,
        Unit::Rem(n) => n * ctx.root_font_size,
        Unit::Em(n) => n * ctx.table_font_size,
        Unit::Auto => return AUTO_SENTINEL,
    };
    clamp_nonnegative(raw)
}

fn clamp_nonnegative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
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
    fn parse_bare_number_is_pixels() {
        assert_eq!(parse_unit("120").unwrap(), Unit::Px(120.0));
        assert_eq!(parse_unit("120px").unwrap(), Unit::Px(120.0));
    }

    #[test]
    fn parse_percent_rem_em_auto() {
        assert_eq!(parse_unit("10%").unwrap(), Unit::Percent(10.0));
        assert_eq!(parse_unit("2rem").unwrap(), Unit::Rem(2.0));
        assert_eq!(parse_unit("1.5em").unwrap(), Unit::Em(1.5));
        assert_eq!(parse_unit("auto").unwrap(), Unit::Auto);
        assert_eq!(parse_unit("AUTO").unwrap(), Unit::Auto);
    }

    #[test]
    fn resolve_percent_against_container_width() {
        assert_eq!(resolve(Unit::Percent(10.0), &ctx()), 100.0);
    }

    #[test]
    fn resolve_rem_against_root_font_size() {
        assert_eq!(resolve(Unit::Rem(2.0), &ctx()), 32.0);
    }

    #[test]
    fn resolve_em_against_table_font_size() {
        assert_eq!(resolve(Unit::Em(1.0), &ctx()), 14.0);
    }

    #[test]
    fn resolve_auto_returns_sentinel() {
        assert_eq!(resolve(Unit::Auto, &ctx()), AUTO_SENTINEL);
    }

    #[test]
    fn resolve_clamps_negative_to_zero() {
        assert_eq!(resolve(Unit::Px(-5.0), &ctx()), 0.0);
    }

    #[test]
    fn resolve_clamps_nan_to_zero() {
        assert_eq!(resolve(Unit::Px(f64::NAN), &ctx()), 0.0);
    }
}
