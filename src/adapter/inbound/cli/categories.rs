//! Handler for the `categories` command.

use crate::infrastructure::config::settings::Config;

/// Print the configured category table.
pub fn execute(config: &Config) {
    print!("{}", render(config));
}

fn render(config: &Config) -> String {
    let mut out = format!("Exchange: {}\n", config.exchange.exchange());
    for rule in &config.categories {
        out.push_str(&format!("\n{}\n", rule.label));
        out.push_str(&format!("  subcategories: {}\n", rule.subcategories.join(", ")));
        if rule.keywords.is_empty() {
            out.push_str("  keywords:      (none)\n");
        } else {
            out.push_str(&format!("  keywords:      {}\n", rule.keywords.join(", ")));
        }
    }
    out
}
