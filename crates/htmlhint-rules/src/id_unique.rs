//! Rule to require unique `id` values within a document.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenKind};
use std::collections::HashSet;

/// Rule name for id-unique.
pub const NAME: &str = "id-unique";

/// Requires `id` attribute values to be unique in a document.
#[derive(Debug, Clone, Default)]
pub struct IdUnique {
    seen: HashSet<String>,
}

impl Rule for IdUnique {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "The value of id attributes must be unique."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(id) = token.as_start_tag().and_then(|tag| tag.attribute("id")) else {
            return Ok(());
        };
        if id.value.is_empty() {
            return Ok(());
        }
        if !self.seen.insert(id.value.to_string()) {
            ctx.report(
                id.position,
                format!("The id value [ {} ] must be unique.", id.value),
                id.raw,
            );
        }
        Ok(())
    }
}
