//! Rule to require double-quoted attribute values.

use htmlhint_core::{QuoteStyle, Rule, RuleContext, RuleError, Token, TokenKind};

/// Rule name for attr-value-double-quotes.
pub const NAME: &str = "attr-value-double-quotes";

/// Requires every attribute value to be wrapped in double quotes.
///
/// Bare attributes such as `disabled` have no value and are not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrValueDoubleQuotes;

impl Rule for AttrValueDoubleQuotes {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Attribute values must be in double quotes."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(tag) = token.as_start_tag() else {
            return Ok(());
        };
        let offending = tag
            .attributes
            .iter()
            .filter(|attr| attr.quote != QuoteStyle::Double && attr.raw.contains('='));
        for attr in offending {
            ctx.report(
                attr.position,
                format!(
                    "The value of attribute [ {} ] must be in double quotes.",
                    attr.name
                ),
                attr.raw,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check;

    #[test]
    fn test_detects_single_and_unquoted_values() {
        let messages = check::<AttrValueDoubleQuotes>("<a href='x' title=y class=\"z\">");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].message.contains("[ href ]"));
        assert!(messages[1].message.contains("[ title ]"));
    }

    #[test]
    fn test_ignores_bare_attributes() {
        assert!(check::<AttrValueDoubleQuotes>("<input disabled checked>").is_empty());
    }
}
