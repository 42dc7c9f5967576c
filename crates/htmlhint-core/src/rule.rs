//! Rule trait for defining lint rules.

use crate::scanner::LineIndex;
use crate::token::{Position, Token, TokenKind};
use crate::types::{Message, Severity};
use std::any::Any;
use thiserror::Error;

/// A lint rule fed one token at a time.
///
/// A fresh instance is created for every lint pass, so rules may keep
/// per-document state (an open-tag stack, a set of seen ids) in `self`
/// without it leaking into the next document.
///
/// # Example
///
/// ```ignore
/// use htmlhint_core::{Rule, RuleContext, RuleError, Token, TokenKind};
///
/// #[derive(Default)]
/// pub struct NoComments;
///
/// impl Rule for NoComments {
///     fn id(&self) -> &'static str { "no-comments" }
///
///     fn applies_to(&self, kind: TokenKind) -> bool {
///         kind == TokenKind::Comment
///     }
///
///     fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
///         ctx.report(token.position, "Comments are not allowed.", token.raw);
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case id of this rule (e.g., "alt-require").
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether tokens of this kind should be dispatched to the rule.
    fn applies_to(&self, _kind: TokenKind) -> bool {
        true
    }

    /// Inspects one token.
    ///
    /// Only called while the rule's effective severity is not off.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if the rule cannot complete. The engine turns the
    /// error into a single message and keeps going.
    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError>;

    /// Called once at end of document with the severity in effect there.
    ///
    /// # Errors
    ///
    /// Same policy as [`Rule::check`].
    fn finish(&mut self, _ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Creates a fresh rule instance for one lint pass.
pub type RuleFactory = fn() -> RuleBox;

/// Error raised by a rule during dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule reported a failure.
    #[error("{message}")]
    Failed {
        /// What went wrong.
        message: String,
    },

    /// The rule panicked.
    #[error("panicked: {message}")]
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },
}

impl RuleError {
    /// Creates a [`RuleError::Failed`].
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::Panicked { message }
    }
}

/// The handle a rule reports through.
///
/// Every message it creates carries the rule's id and the severity in
/// effect where the rule was invoked.
pub struct RuleContext<'r> {
    rule_id: &'static str,
    severity: Severity,
    lines: &'r LineIndex<'r>,
    messages: &'r mut Vec<Message>,
}

impl<'r> RuleContext<'r> {
    /// Creates a context that appends to `messages`.
    #[must_use]
    pub fn new(
        rule_id: &'static str,
        severity: Severity,
        lines: &'r LineIndex<'r>,
        messages: &'r mut Vec<Message>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            lines,
            messages,
        }
    }

    /// Id of the rule being invoked.
    #[must_use]
    pub fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    /// Severity the rule is running at.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Appends a message at `position`.
    ///
    /// The source line containing the position becomes the evidence.
    pub fn report(&mut self, position: Position, message: impl Into<String>, raw: &str) {
        let evidence = self.lines.line(position.line).unwrap_or_default();
        self.messages.push(
            Message::new(self.rule_id, self.severity, position, message)
                .with_evidence(evidence)
                .with_raw(raw),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[derive(Default)]
    struct CountTags {
        seen: usize,
    }

    impl Rule for CountTags {
        fn id(&self) -> &'static str {
            "count-tags"
        }

        fn applies_to(&self, kind: TokenKind) -> bool {
            kind == TokenKind::StartTag
        }

        fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
            self.seen += 1;
            ctx.report(token.position, format!("tag #{}", self.seen), token.raw);
            Ok(())
        }
    }

    #[test]
    fn test_rule_trait_defaults() {
        let rule = CountTags::default();
        assert_eq!(rule.id(), "count-tags");
        assert_eq!(rule.description(), "");
        assert!(rule.applies_to(TokenKind::StartTag));
        assert!(!rule.applies_to(TokenKind::Text));
    }

    #[test]
    fn report_fills_evidence_and_severity() {
        let source = "<p>\n  <b>x</b>";
        let lines = LineIndex::new(source);
        let tokens: Vec<_> = scan(source).collect();
        let mut messages = Vec::new();
        let mut rule = CountTags::default();
        {
            let mut ctx = RuleContext::new(rule.id(), Severity::Warning, &lines, &mut messages);
            for token in &tokens {
                if rule.applies_to(token.kind()) {
                    rule.check(token, &mut ctx).unwrap();
                }
            }
        }
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].severity, Severity::Warning);
        assert_eq!(messages[1].line, 2);
        assert_eq!(messages[1].col, 3);
        assert_eq!(messages[1].evidence, "  <b>x</b>");
        assert_eq!(messages[1].raw, "<b>");
        assert_eq!(messages[1].message, "tag #2");
    }

    #[test]
    fn panic_payloads_become_messages() {
        let err = RuleError::from_panic(&"boom");
        assert_eq!(err.to_string(), "panicked: boom");
        let err = RuleError::from_panic(&String::from("bang"));
        assert_eq!(err.to_string(), "panicked: bang");
        let err = RuleError::from_panic(&42_u8);
        assert_eq!(err.to_string(), "panicked: unknown panic payload");
    }
}
