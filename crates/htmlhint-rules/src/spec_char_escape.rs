//! Rule to require escaping of `<` and `>` in text.

use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenData, TokenKind, RAW_TEXT_ELEMENTS};

/// Rule name for spec-char-escape.
pub const NAME: &str = "spec-char-escape";

/// Requires `<` and `>` in character data to be written as entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecCharEscape {
    in_raw_text: bool,
}

impl Rule for SpecCharEscape {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Special characters must be escaped."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::StartTag | TokenKind::EndTag | TokenKind::Text
        )
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        match &token.data {
            TokenData::StartTag(tag) => {
                self.in_raw_text = !tag.self_closing
                    && RAW_TEXT_ELEMENTS.iter().any(|name| tag.is(name));
            }
            TokenData::EndTag { .. } => self.in_raw_text = false,
            TokenData::Text if !self.in_raw_text && !token.raw.starts_with("<![CDATA[") => {
                for (index, ch) in token.raw.char_indices() {
                    if ch == '<' || ch == '>' {
                        ctx.report(
                            token.position_at(index),
                            format!("Special characters must be escaped : [ {ch} ]."),
                            token.raw,
                        );
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check;

    #[test]
    fn test_detects_each_special_char() {
        let messages = check::<SpecCharEscape>("<p>a > b\n< c</p>");
        assert_eq!(messages.len(), 2);
        assert_eq!((messages[0].line, messages[0].col), (1, 6));
        assert_eq!((messages[1].line, messages[1].col), (2, 1));
        assert_eq!(messages[1].message, "Special characters must be escaped : [ < ].");
    }

    #[test]
    fn test_stray_gt_after_tag() {
        let messages = check::<SpecCharEscape>("<P ATTR='1'>>");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].col, 13);
    }

    #[test]
    fn test_skips_script_and_cdata() {
        assert!(check::<SpecCharEscape>("<script>if (a < b && c > d) {}</script>").is_empty());
        assert!(check::<SpecCharEscape>("<![CDATA[ a < b ]]>").is_empty());
    }

    #[test]
    fn test_skips_every_raw_text_element() {
        for name in RAW_TEXT_ELEMENTS {
            let source = format!("<{name}>a < b > c</{name}><p>></p>");
            let messages = check::<SpecCharEscape>(&source);
            assert_eq!(messages.len(), 1, "{name}");
            assert_eq!(messages[0].raw, ">");
        }
    }

    #[test]
    fn test_allows_entities() {
        assert!(check::<SpecCharEscape>("<p>a &lt; b &gt; c</p>").is_empty());
    }
}
