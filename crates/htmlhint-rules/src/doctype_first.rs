//! Rule to require a doctype before any content.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenData};

/// Rule name for doctype-first.
pub const NAME: &str = "doctype-first";

/// Requires the first significant token to be a doctype.
///
/// Leading whitespace and comments (including directives) are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoctypeFirst {
    decided: bool,
}

impl Rule for DoctypeFirst {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Doctype must be declared first."
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        if self.decided {
            return Ok(());
        }
        match token.data {
            TokenData::Comment { .. } => return Ok(()),
            TokenData::Text if token.raw.trim().is_empty() => return Ok(()),
            TokenData::Doctype => {}
            _ => ctx.report(token.position, "Doctype must be declared first.", token.raw),
        }
        self.decided = true;
        Ok(())
    }
}
