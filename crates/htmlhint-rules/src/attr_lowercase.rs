//! Rule to require lowercase attribute names.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenKind};

/// Rule name for attr-lowercase.
pub const NAME: &str = "attr-lowercase";

/// Requires attribute names to be lowercase.
///
/// Names listed in `allow` are accepted as written, for attributes such as
/// SVG's `viewBox`.
#[derive(Debug, Clone)]
pub struct AttrLowercase {
    /// Attribute names exempt from the check.
    pub allow: Vec<String>,
}

impl Default for AttrLowercase {
    fn default() -> Self {
        Self::new()
    }
}

impl AttrLowercase {
    /// Creates a new rule that exempts the common SVG camel-case attributes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow: ["viewBox", "preserveAspectRatio", "gradientUnits"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Rule for AttrLowercase {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "All attribute names must be in lowercase."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Some(tag) = token.as_start_tag() else {
            return Ok(());
        };
        for attr in &tag.attributes {
            if attr.name.chars().any(|ch| ch.is_ascii_uppercase())
                && !self.allow.iter().any(|allowed| allowed == attr.name)
            {
                ctx.report(
                    attr.position,
                    format!(
                        "The attribute name of [ {} ] must be in lowercase.",
                        attr.name
                    ),
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
    fn test_detects_each_uppercase_attribute() {
        let messages = check::<AttrLowercase>("<p ID=\"a\" class=\"b\" onClick=\"c\">");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].col, 4);
        assert_eq!(messages[0].raw, "ID=\"a\"");
        assert!(messages[1].message.contains("[ onClick ]"));
    }

    #[test]
    fn test_allows_svg_camel_case() {
        assert!(check::<AttrLowercase>("<svg viewBox=\"0 0 1 1\"></svg>").is_empty());
    }
}
