//! Indicator listing command implementation.

use dalal_indicators::registry::{available_categories, indicators_by_category};

/// List available indicators, optionally filtered by category.
pub(crate) fn list_indicators(category: Option<&str>, verbose: bool) {
    super::header("Available Indicators");

    for cat in available_categories() {
        let cat_name = cat.to_string();
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        super::section(&cat_name);
        if verbose {
            println!("  {}\n", cat.description());
        }

        for info in indicators_by_category(cat) {
            if verbose {
                println!(
                    "  {:14} - {} (lookback: {} bars)",
                    info.name, info.description, info.lookback
                );
                if !info.outputs.is_empty() {
                    println!("  {:14}   series: {}", "", info.outputs.join(", "));
                }
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for descriptions, lookbacks and series names.\n");
    }
}
