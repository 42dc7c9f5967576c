//! Rule to require lowercase element names.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenKind};

/// Rule name for tagname-lowercase.
pub const NAME: &str = "tagname-lowercase";

/// Requires element names in start and end tags to be lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagnameLowercase;

impl Rule for TagnameLowercase {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "All html element names must be in lowercase."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        matches!(kind, TokenKind::StartTag | TokenKind::EndTag)
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        if let Some(name) = token.tag_name() {
            if name.chars().any(|ch| ch.is_ascii_uppercase()) {
                ctx.report(
                    token.position,
                    format!("The html element name of [ {name} ] must be in lowercase."),
                    token.raw,
                );
            }
        }
        Ok(())
    }
}
