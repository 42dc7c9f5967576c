//! Rule to forbid empty resource references.
//!
//! An empty `src` makes browsers request the page itself again.

use htmlhint_core::{Rule, RuleContext, RuleError, StartTag, Token, TokenKind};

/// Rule name for src-not-empty.
pub const NAME: &str = "src-not-empty";

/// Element name and the attribute that references its resource.
const RESOURCE_ATTRIBUTES: &[(&str, &str)] = &[
    ("img", "src"),
    ("script", "src"),
    ("embed", "src"),
    ("bgsound", "src"),
    ("iframe", "src"),
    ("link", "href"),
    ("object", "data"),
];

/// Requires resource attributes, when present, to have a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrcNotEmpty;

impl SrcNotEmpty {
    fn resource_attribute(tag: &StartTag<'_>) -> Option<&'static str> {
        RESOURCE_ATTRIBUTES
            .iter()
            .find(|(element, _)| tag.is(element))
            .map(|(_, attribute)| *attribute)
    }
}

impl Rule for SrcNotEmpty {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "The src attribute of an img(script,link) must have a value."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(tag) = token.as_start_tag() else {
            return Ok(());
        };
        let Some(name) = Self::resource_attribute(tag) else {
            return Ok(());
        };
        for attr in tag
            .attributes
            .iter()
            .filter(|attr| attr.name.eq_ignore_ascii_case(name) && attr.value.trim().is_empty())
        {
            ctx.report(
                attr.position,
                format!(
                    "The attribute [ {} ] of the tag [ {} ] must have a value.",
                    attr.name, tag.name
                ),
                attr.raw,
            );
        }
        Ok(())
    }
}
