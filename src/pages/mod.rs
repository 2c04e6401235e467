//! Concrete page views for the built-in content kinds.

mod production_table;
mod summary;

pub use production_table::ProductionTableView;
pub use summary::SummaryView;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column separator.
const GAP: &str = "  ";

/// Fit `text` into exactly `width` display columns, truncating with `…`.
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

/// Right-align `text` in `width` columns.
fn fit_right(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return fit(text, width);
    }
    format!("{}{text}", " ".repeat(width - text_width))
}

/// Join cells with the column separator.
fn join(cells: &[String]) -> String {
    cells.join(GAP)
}
