//! ANSI escape codes used by the renderer, and the mapping from line styles
//! to them.

use super::layout::LineStyle;

// ============================================================================
// TEXT ATTRIBUTES
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const REVERSE: &str = "\x1b[7m";

// ============================================================================
// COLORS
// ============================================================================

pub const FG_RED: &str = "\x1b[31m";
pub const FG_BRIGHT_BLACK: &str = "\x1b[90m"; // Also known as dark gray
pub const FG_256_DEEP_SKY_BLUE: &str = "\x1b[38;5;25m";
pub const BG_256_DEEP_SKY_BLUE: &str = "\x1b[48;5;25m";

// ============================================================================
// SEMANTIC COLOR ALIASES
// ============================================================================

pub const FG_ERROR: &str = FG_RED;
pub const FG_MUTED: &str = FG_BRIGHT_BLACK;
pub const FG_SEPARATOR: &str = FG_256_DEEP_SKY_BLUE;
pub const BG_SELECTED: &str = BG_256_DEEP_SKY_BLUE;

/// Escape prefix for a composed line; empty for plain text
pub fn style_prefix(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Plain => "",
        LineStyle::Heading => BOLD,
        LineStyle::Muted => FG_MUTED,
        LineStyle::Error => FG_ERROR,
        LineStyle::Highlight => BG_SELECTED,
    }
}
