//! # htmlhint-rules
//!
//! Built-in lint rules and presets for htmlhint.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `alt-require` | `<img>`, `<area href>` and `<input type="image">` need alternative text |
//! | `attr-lowercase` | Attribute names must be lowercase |
//! | `attr-no-duplication` | An attribute may appear only once per element |
//! | `attr-value-double-quotes` | Attribute values must use double quotes |
//! | `doctype-first` | The document must start with a doctype |
//! | `id-unique` | `id` values must be unique in the document |
//! | `spec-char-escape` | `<` and `>` in text must be escaped |
//! | `src-not-empty` | `src`, `href` and `data` of embedding elements must not be empty |
//! | `tag-pair` | Every start tag needs a matching end tag |
//! | `tagname-lowercase` | Element names must be lowercase |
//! | `title-require` | `<head>` needs a non-empty `<title>` |
//!
//! ## Usage
//!
//! ```ignore
//! use htmlhint_core::{Configuration, Linter};
//! use htmlhint_rules::{AltRequire, TagPair};
//!
//! let linter = Linter::builder()
//!     .rule::<AltRequire>()
//!     .rule::<TagPair>()
//!     .presets(htmlhint_rules::preset_catalog())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alt_require;
mod attr_lowercase;
mod attr_no_duplication;
mod attr_value_double_quotes;
mod doctype_first;
mod id_unique;
mod presets;
mod spec_char_escape;
mod src_not_empty;
mod tag_pair;
mod tagname_lowercase;
mod title_require;

#[cfg(test)]
mod testing;

pub use alt_require::AltRequire;
pub use attr_lowercase::AttrLowercase;
pub use attr_no_duplication::AttrNoDuplication;
pub use attr_value_double_quotes::AttrValueDoubleQuotes;
pub use doctype_first::DoctypeFirst;
pub use id_unique::IdUnique;
pub use presets::{all_rules, default_linter, preset_catalog, BuiltinPreset};
pub use spec_char_escape::SpecCharEscape;
pub use src_not_empty::SrcNotEmpty;
pub use tag_pair::{TagPair, VOID_ELEMENTS};
pub use tagname_lowercase::TagnameLowercase;
pub use title_require::TitleRequire;

/// Re-export core types for convenience.
pub use htmlhint_core::{Message, Rule, Severity};
