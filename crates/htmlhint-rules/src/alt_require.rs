//! Rule to require alternative text on images.
//!
//! # Detected Patterns
//!
//! - `<img>` without an `alt` attribute
//! - `<area href="...">` with a missing or empty `alt`
//! - `<input type="image">` with a missing or empty `alt`
//!
//! # Good Patterns
//!
//! ```html
//! <img src="logo.png" alt="Company logo">
//! <img src="spacer.gif" alt="">
//! ```

use htmlhint_core::{Rule, RuleContext, RuleError, StartTag, Token, TokenKind};

/// Rule name for alt-require.
pub const NAME: &str = "alt-require";

/// Requires alternative text on image-like elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct AltRequire;

impl AltRequire {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn problem(tag: &StartTag<'_>) -> Option<&'static str> {
        let has_alt_value = tag.attribute("alt").is_some_and(|alt| !alt.value.is_empty());
        if tag.is("img") {
            (!tag.has_attribute("alt"))
                .then_some("An alt attribute must be present on <img> elements.")
        } else if tag.is("area") && tag.has_attribute("href") {
            (!has_alt_value).then_some("The alt attribute of <area> must have a value.")
        } else if tag.is("input")
            && tag
                .attribute("type")
                .is_some_and(|ty| ty.value.eq_ignore_ascii_case("image"))
        {
            (!has_alt_value)
                .then_some("The alt attribute of <input type=\"image\"> must have a value.")
        } else {
            None
        }
    }
}

impl Rule for AltRequire {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "The alt attribute of an <img> element must be present, and alt of <area href> and <input type=\"image\"> must have a value."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(tag) = token.as_start_tag() else {
            return Ok(());
        };
        if let Some(message) = Self::problem(tag) {
            // Just past `<name`.
            let position = token.position_at(1 + tag.name.len());
            ctx.report(position, message, token.raw);
        }
        Ok(())
    }
}
