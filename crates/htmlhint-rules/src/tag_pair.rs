//! Rule to require matching start and end tags.
//!
//! Open start tags are kept on a stack for the length of one document.
//! Self-closing tags and void elements never open anything.
//!
//! # Detected Patterns
//!
//! - `<div><span></div>`: the end tag skips an open `<span>`
//! - `</p>` with no open `<p>`
//! - `<ul>` still open at end of document

use htmlhint_core::{Position, Rule, RuleContext, RuleError, Token, TokenData, TokenKind};
use tracing::debug;

/// Rule name for tag-pair.
pub const NAME: &str = "tag-pair";

/// Elements that never take an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr",
    "image", "img", "input", "isindex", "keygen", "link", "meta", "param", "source", "track",
    "wbr",
];

#[derive(Debug, Clone)]
struct OpenTag {
    name: String,
    raw: String,
    position: Position,
}

impl OpenTag {
    fn closer(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// Requires every start tag to be closed.
#[derive(Debug, Clone, Default)]
pub struct TagPair {
    stack: Vec<OpenTag>,
}

impl TagPair {
    /// Creates a new rule with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn is_void(name: &str) -> bool {
        VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
    }

    fn close(&mut self, token: &Token<'_>, name: &str, ctx: &mut RuleContext<'_>) {
        let Some(index) = self
            .stack
            .iter()
            .rposition(|open| open.name.eq_ignore_ascii_case(name))
        else {
            ctx.report(
                token.position,
                format!("Tag must be paired, no start tag: [ {} ]", token.raw),
                token.raw,
            );
            return;
        };

        let skipped = self.stack.split_off(index + 1);
        self.stack.pop();
        if let Some(first) = skipped.first() {
            debug!("{} closes {} open tags early", token.raw, skipped.len());
            let missing: String = skipped.iter().rev().map(OpenTag::closer).collect();
            ctx.report(
                token.position,
                format!(
                    "Tag must be paired, missing: [ {missing} ], open tag match failed [ {} ] on line {}.",
                    first.raw, first.position.line
                ),
                token.raw,
            );
        }
    }
}

impl Rule for TagPair {
    fn id(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Tag must be paired."
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        matches!(kind, TokenKind::StartTag | TokenKind::EndTag)
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        match &token.data {
            TokenData::StartTag(tag) => {
                if !tag.self_closing && !Self::is_void(tag.name) {
                    self.stack.push(OpenTag {
                        name: tag.name.to_ascii_lowercase(),
                        raw: token.raw.to_string(),
                        position: token.position,
                    });
                }
            }
            TokenData::EndTag { name } => self.close(token, name, ctx),
            _ => {}
        }
        Ok(())
    }

    fn finish(&mut self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        for open in std::mem::take(&mut self.stack) {
            ctx.report(
                open.position,
                format!(
                    "Tag must be paired, missing: [ {} ], start tag match failed [ {} ] on line {}.",
                    open.closer(),
                    open.raw,
                    open.position.line
                ),
                &open.raw,
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
    fn test_allows_balanced_tags() {
        assert!(check::<TagPair>("<div><p>a</p><br><img src=\"a\"/></DIV>").is_empty());
    }

    #[test]
    fn test_reports_unclosed_at_start_position() {
        let messages = check::<TagPair>("<ul>\n  <li>one\n</ul>");
        assert_eq!(messages.len(), 1);
        assert_eq!((messages[0].line, messages[0].col), (3, 1));
        assert!(messages[0].message.contains("missing: [ </li> ]"));
        assert!(messages[0].message.contains("[ <li> ] on line 2"));
    }

    #[test]
    fn test_open_tags_at_end_in_document_order() {
        let messages = check::<TagPair>("<html>\n<body>\n<div>");
        assert_eq!(messages.len(), 3);
        let lines: Vec<_> = messages.iter().map(|m| m.line).collect();
        assert_eq!(lines, [1, 2, 3]);
        assert_eq!(messages[2].raw, "<div>");
    }

    #[test]
    fn test_end_tag_without_start() {
        let messages = check::<TagPair>("<div></p></div>");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "Tag must be paired, no start tag: [ </p> ]");
        assert_eq!(messages[0].col, 6);
    }

    #[test]
    fn test_one_mismatch_for_several_skipped_tags() {
        let messages = check::<TagPair>("<div><a><b></div>");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].message.contains("missing: [ </b></a> ]"));
    }

    #[test]
    fn test_raw_text_elements_pair_up() {
        assert!(check::<TagPair>("<script>if (a < b) { x = '</div>'; }</script>").is_empty());
    }
}
