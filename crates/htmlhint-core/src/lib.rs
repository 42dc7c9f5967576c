//! # htmlhint-core
//!
//! Core engine for linting markup documents.
//!
//! This crate provides the pipeline every rule runs inside of:
//!
//! - [`scan`] for turning source text into positioned [`Token`]s
//! - [`extract_directives`] for inline `<!-- htmlhint ... -->` comments
//! - [`resolve_base`] and [`effective_at`] for the ruleset at a position
//! - [`Rule`] trait and [`Linter`] for dispatching tokens to rules
//! - [`format_messages`] for rendering [`Message`]s
//!
//! ## Example
//!
//! ```ignore
//! use htmlhint_core::{Configuration, Linter, Severity};
//!
//! let linter = Linter::builder()
//!     .rule::<MyRule>()
//!     .build();
//!
//! let config = Configuration::new().rule("my-rule", Severity::Error);
//! let messages = linter.verify("<p>hello</p>", &config)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod directive;
mod format;
mod linter;
mod resolver;
mod rule;
mod scanner;
mod token;
mod types;

pub use config::{
    ConfigError, Configuration, Preset, PresetCatalog, Ruleset, DEFAULT_PRESET, PRESET_NAMESPACE,
};
pub use directive::{
    extract_directives, parse_directive, ConfigurationDelta, DeltaKind, DIRECTIVE_KEYWORD,
};
pub use format::{
    char_width, format_messages, ContextWindow, FormatOptions, DEFAULT_MAX_WIDTH, ELLIPSIS,
};
pub use linter::{LintError, Linter, LinterBuilder, RuleInfo};
pub use resolver::{effective_at, resolve_base, RulesetCursor, RulesetSource};
pub use rule::{Rule, RuleBox, RuleContext, RuleError, RuleFactory};
pub use scanner::{scan, LineIndex, ScanError, Scanner, RAW_TEXT_ELEMENTS};
pub use token::{Attribute, Position, QuoteStyle, StartTag, Token, TokenData, TokenKind};
pub use types::{count_by_severity, Message, MessageDiagnostic, Severity};
