//! Rule to require a non-empty `<title>` in `<head>`.

use htmlhint_core::{Position, Rule, RuleContext, RuleError, Token, TokenData, TokenKind};

/// Rule name for title-require.
pub const NAME: &str = "title-require";

#[derive(Debug, Clone)]
struct OpenTitle {
    position: Position,
    raw: String,
    has_text: bool,
}

/// Requires `<head>` to contain a `<title>` with text.
///
/// Checked when `</head>` is seen; documents without a head are not checked.
#[derive(Debug, Clone, Default)]
pub struct TitleRequire {
    in_head: bool,
    has_title: bool,
    title: Option<OpenTitle>,
}

impl Rule for TitleRequire {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "<title> must be present in <head> tag."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::StartTag | TokenKind::EndTag | TokenKind::Text
        )
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        match &token.data {
            TokenData::StartTag(tag) if tag.is("head") => {
                self.in_head = true;
                self.has_title = false;
            }
            TokenData::StartTag(tag) if tag.is("title") && self.in_head => {
                self.has_title = true;
                self.title = Some(OpenTitle {
                    position: token.position,
                    raw: token.raw.to_string(),
                    has_text: false,
                });
            }
            TokenData::Text => {
                if let Some(title) = &mut self.title {
                    title.has_text |= !token.raw.trim().is_empty();
                }
            }
            TokenData::EndTag { name } if name.eq_ignore_ascii_case("title") => {
                if let Some(title) = self.title.take().filter(|title| !title.has_text) {
                    ctx.report(
                        title.position,
                        "<title></title> must not be empty.",
                        &title.raw,
                    );
                }
            }
            TokenData::EndTag { name } if name.eq_ignore_ascii_case("head") && self.in_head => {
                self.in_head = false;
                if !self.has_title {
                    ctx.report(
                        token.position,
                        "<title> must be present in <head> tag.",
                        token.raw,
                    );
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
    fn test_detects_missing_title() {
        let messages = check::<TitleRequire>("<html><head><meta charset=\"utf-8\"></head></html>");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].raw, "</head>");
    }

    #[test]
    fn test_detects_empty_title() {
        let messages = check::<TitleRequire>("<head><title>  </title></head>");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "<title></title> must not be empty.");
        assert_eq!(messages[0].col, 7);
    }

    #[test]
    fn test_allows_title() {
        assert!(check::<TitleRequire>("<head><title>Home</title></head>").is_empty());
    }

    #[test]
    fn test_documents_without_head_are_fine() {
        assert!(check::<TitleRequire>("<p>fragment</p>").is_empty());
    }
}
