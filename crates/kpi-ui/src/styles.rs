//! Ayu color theme and styling functions for KPI output.
//!
//! Uses the Ayu Dark palette. Color source:
//! <https://github.com/ayu-theme/ayu-colors>
//!
//! Only values and problems get strong color; ids and formulas stay close
//! to plain text so listings remain easy to copy.

use kpi_core::{Category, KpiDefinition};
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// Category colors
const CAT_LIQUIDITY: (u8, u8, u8) = (0x95, 0xe6, 0xcb); // #95e6cb - teal
const CAT_EFFICIENCY: (u8, u8, u8) = (0xff, 0x8f, 0x40); // #ff8f40 - orange
const CAT_PROFITABILITY: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - green
const CAT_LEVERAGE: (u8, u8, u8) = (0xf2, 0x6d, 0x78); // #f26d78 - red
const CAT_VALUATION: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff - purple
const CAT_GROWTH: (u8, u8, u8) = (0xe6, 0xb4, 0x50); // #e6b450 - gold

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠
pub const ICON_FAIL: &str = "\u{2716}"; // ✖

/// Marker shown next to built-in KPIs.
pub const BUILT_IN_MARKER: &str = "\u{25C6}"; // ◆
/// Marker shown next to user-defined KPIs.
pub const USER_MARKER: &str = "\u{25C7}"; // ◇


// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

// ---------------------------------------------------------------------------
// KPI rendering
// ---------------------------------------------------------------------------

/// Renders a category name in its theme color. Custom categories are muted.
pub fn render_category(category: &Category) -> String {
    let s = category.as_str();
    match category {
        Category::Liquidity => color_str(s, CAT_LIQUIDITY),
        Category::Efficiency => color_str(s, CAT_EFFICIENCY),
        Category::Profitability => color_str(s, CAT_PROFITABILITY),
        Category::Leverage => color_str(s, CAT_LEVERAGE),
        Category::Valuation => color_str(s, CAT_VALUATION),
        Category::Growth => color_str(s, CAT_GROWTH),
        Category::Custom(_) => render_muted(s),
    }
}

/// Renders a computed KPI value: bold green.
pub fn render_value(s: &str) -> String {
    color_bold_str(s, PASS)
}

/// Renders one listing line: `◆ id  Name  [category]`.
pub fn render_kpi_line(def: &KpiDefinition) -> String {
    let marker = if def.is_built_in {
        render_accent(BUILT_IN_MARKER)
    } else {
        render_muted(USER_MARKER)
    };
    format!(
        "{} {}  {}  [{}]",
        marker,
        render_bold(&def.id),
        def.name,
        render_category(&def.category)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    fn def(is_built_in: bool) -> KpiDefinition {
        KpiDefinition {
            id: "operating_cf_debt".into(),
            name: "Operating CF / Debt".into(),
            formula: "Operating_Cash_Flow / Total_Debt".into(),
            category: Category::Liquidity,
            description: String::new(),
            is_built_in,
            created_at: Default::default(),
        }
    }

    #[test]
    fn category_contains_name() {
        assert!(render_category(&Category::Leverage).contains("leverage"));
        assert!(render_category(&Category::Custom("esg".into())).contains("esg"));
    }

    #[test]
    fn kpi_line_contains_fields() {
        let line = render_kpi_line(&def(true));
        assert!(line.contains("operating_cf_debt"));
        assert!(line.contains("Operating CF / Debt"));
        assert!(line.contains("liquidity"));
        assert!(line.contains(BUILT_IN_MARKER));
        assert!(render_kpi_line(&def(false)).contains(USER_MARKER));
    }

    #[test]
    fn value_contains_text() {
        assert!(render_value("3.42").contains("3.42"));
    }
}
