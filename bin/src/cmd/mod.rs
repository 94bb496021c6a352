//! CLI subcommand modules.
//!
//! This module contains the implementations for all dalal CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod benchmarks;
pub(crate) mod indicators;
pub(crate) mod technical;

/// Print a boxed section header.
pub(crate) fn header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a titled section rule.
pub(crate) fn section(title: &str) {
    println!("{title}:");
    println!("{}", "-".repeat(60));
}

/// Format an optional value, using "-" when undefined.
pub(crate) fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.234)), "1.23");
        assert_eq!(fmt_opt(None), "-");
    }
}
