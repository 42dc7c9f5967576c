//! # htmlhint
//!
//! Static analysis for HTML documents.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules, and wires them together behind two calls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let messages = htmlhint::verify("<img src=\"a.png\">", None)?;
//! for line in htmlhint::format_messages(&messages, None) {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Configuration
//!
//! Without a configuration the `recommended` preset applies. Presets are
//! combined through `extends`, and explicit `rules` always win:
//!
//! ```rust,ignore
//! use htmlhint::{Configuration, Severity};
//!
//! let config = Configuration::new()
//!     .extend("htmlhint:legacy")
//!     .rule("alt-require", Severity::Error);
//! let messages = htmlhint::verify(source, Some(&config))?;
//! ```
//!
//! ## Inline Directives
//!
//! Comments starting with `htmlhint` change the active rules from the next
//! token onwards:
//!
//! ```html
//! <!-- htmlhint alt-require:off, tag-pair:warning -->
//! <!-- htmlhint -->  <!-- back to the configured rules -->
//! ```

#![forbid(unsafe_code)]

use std::sync::OnceLock;

// Re-export core types and traits
pub use htmlhint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use htmlhint_rules::*;
}

/// The linter used by [`verify`]: every built-in rule and preset.
#[must_use]
pub fn linter() -> &'static Linter {
    static LINTER: OnceLock<Linter> = OnceLock::new();
    LINTER.get_or_init(htmlhint_rules::default_linter)
}

/// Lints `source` with the built-in rules.
///
/// `None` behaves like an empty [`Configuration`], which selects the
/// `recommended` preset.
///
/// # Errors
///
/// Returns [`LintError::Config`] if `extends` names an unknown preset.
pub fn verify(source: &str, config: Option<&Configuration>) -> Result<Vec<Message>, LintError> {
    match config {
        Some(config) => linter().verify(source, config),
        None => linter().verify(source, &Configuration::default()),
    }
}

/// Renders messages as output lines, two per message.
///
/// `None` uses [`FormatOptions::default`].
#[must_use]
pub fn format_messages(messages: &[Message], options: Option<&FormatOptions>) -> Vec<String> {
    htmlhint_core::format_messages(messages, options.unwrap_or(&FormatOptions::default()))
}
