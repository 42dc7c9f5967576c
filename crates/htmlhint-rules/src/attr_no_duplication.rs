//! Rule to forbid repeated attributes on one element.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenKind};
use std::collections::HashSet;

/// Rule name for attr-no-duplication.
pub const NAME: &str = "attr-no-duplication";

/// Forbids the same attribute name twice on one element.
///
/// Names compare ASCII case-insensitively; each repeat is reported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrNoDuplication;

impl Rule for AttrNoDuplication {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Elements cannot have duplicate attributes."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(tag) = token.as_start_tag() else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for attr in &tag.attributes {
            if !seen.insert(attr.name.to_ascii_lowercase()) {
                ctx.report(
                    attr.position,
                    format!("Duplicate of attribute name [ {} ] was found.", attr.name),
                    attr.raw,
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check;

    #[test]
    fn test_detects_duplicate() {
        let messages = check::<AttrNoDuplication>("<img src=\"\" a=\"1\" a=\"2\"/>");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].col, 19);
        assert_eq!(messages[0].raw, "a=\"2\"");
    }

    #[test]
    fn test_case_insensitive_and_repeated() {
        let messages = check::<AttrNoDuplication>("<p class=a CLASS=b class=c id=x>");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_separate_elements_are_independent() {
        assert!(check::<AttrNoDuplication>("<p id=\"a\"><p id=\"b\">").is_empty());
    }
}
