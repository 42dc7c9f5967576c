//! List rules command implementation.

use htmlhint::rules::BuiltinPreset;

/// Runs the list-rules command.
pub fn run() {
    let linter = htmlhint::linter();

    println!("Available rules:\n");
    println!("{:<26} Description", "Name");
    println!("{}", "-".repeat(80));

    for rule in linter.rules() {
        println!("{:<26} {}", rule.id, rule.description);
    }

    println!("\nPresets:");
    for preset in BuiltinPreset::ALL {
        let marker = if preset == BuiltinPreset::Recommended {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<12} - {}{marker}",
            preset.name(),
            preset.description()
        );
    }

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  htmlhint check --rules alt-require,tag-pair:warning");
}
