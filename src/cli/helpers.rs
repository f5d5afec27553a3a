//! Shared helper functions for CLI commands

use console::style;

use crate::capability::CapabilityLevel;
use crate::control::PointStatus;

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a number with a fixed number of decimals
pub fn fmt_num(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Format an optional number, `-` when absent
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| fmt_num(v, decimals))
        .unwrap_or_else(|| "-".to_string())
}

/// Colored label for a point status
pub fn styled_status(status: PointStatus) -> String {
    match status {
        PointStatus::InControl => style(status.to_string()).green().to_string(),
        PointStatus::OutOfControl => style(status.to_string()).red().bold().to_string(),
    }
}

/// Colored label for a capability level
pub fn styled_level(level: CapabilityLevel) -> String {
    let label = style(level.to_string()).bold();
    match level {
        CapabilityLevel::Excellent | CapabilityLevel::Good => label.green().to_string(),
        CapabilityLevel::Acceptable => label.yellow().to_string(),
        CapabilityLevel::Marginal | CapabilityLevel::Poor => label.red().to_string(),
    }
}

/// Check mark or warning sign
pub fn verdict_mark(ok: bool) -> String {
    if ok {
        style("✓").green().to_string()
    } else {
        style("!").yellow().bold().to_string()
    }
}

/// Section heading for text reports
pub fn heading(title: &str) -> String {
    format!("{}\n{}", style(title).bold().cyan(), style("─".repeat(title.chars().count())).dim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Anderson-Darling", 10), "Anderso...");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.28571, 3), "1.286");
        assert_eq!(fmt_num(100.0, 0), "100");
        assert_eq!(fmt_opt(None, 2), "-");
        assert_eq!(fmt_opt(Some(0.5), 2), "0.50");
    }
}
