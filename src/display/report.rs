//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// A bar for a signed value: negatives grow left of the axis, positives right
///
/// Each side is `half_width` characters wide.
pub fn format_signed_bar(value: f64, max_abs: f64, half_width: usize) -> String {
    if value < 0.0 {
        let left: String = format_bar(-value, max_abs, half_width)
            .chars()
            .rev()
            .map(|c| if c == '░' { ' ' } else { c })
            .collect();
        format!("{}│{}", left, " ".repeat(half_width))
    } else {
        let right: String = format_bar(value, max_abs, half_width)
            .chars()
            .map(|c| if c == '░' { ' ' } else { c })
            .collect();
        format!("{}│{}", " ".repeat(half_width), right)
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
