//! Core types for severities and reported messages.

use crate::token::Position;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Deserializer, Serialize};

/// Severity level of a rule.
///
/// `Off` means the rule is not invoked at all. Overrides replace a severity;
/// they never escalate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule disabled.
    Off,
    /// Reported, but does not fail a check.
    Warning,
    /// Must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity literal: `off`, `warning`, `error`.
    ///
    /// `warn`, `true` (error) and `false` (off) are accepted as aliases.
    #[must_use]
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal.to_ascii_lowercase().as_str() {
            "off" | "false" => Some(Self::Off),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "true" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns true unless this is [`Severity::Off`].
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Off
    }

    /// The lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Literal(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Self::Off),
            Raw::Flag(true) => Ok(Self::Error),
            Raw::Literal(literal) => Self::from_literal(&literal).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "invalid severity \"{literal}\", expected \"off\", \"warning\" or \"error\""
                ))
            }),
        }
    }
}

/// A finding reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Id of the rule that reported it (e.g., "alt-require").
    pub rule_id: String,
    /// Effective severity of the rule at the reported position.
    pub severity: Severity,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
    /// Byte offset in the source.
    pub offset: usize,
    /// Human-readable message.
    pub message: String,
    /// Full source line containing the position.
    pub evidence: String,
    /// Raw text of the token that triggered the message.
    pub raw: String,
}

impl Message {
    /// Creates a new message with empty evidence and raw text.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            line: position.line,
            col: position.col,
            offset: position.offset,
            message: message.into(),
            evidence: String::new(),
            raw: String::new(),
        }
    }

    /// Sets the source line shown as context.
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    /// Sets the raw token text.
    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Position of the message.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.col)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line, self.col, self.severity, self.rule_id, self.message
        )
    }
}

/// Counts messages by severity, returning `(errors, warnings)`.
#[must_use]
pub fn count_by_severity(messages: &[Message]) -> (usize, usize) {
    messages
        .iter()
        .fold((0, 0), |(errors, warnings), m| match m.severity {
            Severity::Error => (errors + 1, warnings),
            Severity::Warning => (errors, warnings + 1),
            Severity::Off => (errors, warnings),
        })
}

/// A [`Message`] rendered as a miette diagnostic against its source.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct MessageDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{rule_id}")]
    span: SourceSpan,
    rule_id: String,
}

impl MessageDiagnostic {
    /// Builds a diagnostic for `message` in the document `name`.
    #[must_use]
    pub fn new(message: &Message, name: &str, source: &str) -> Self {
        let offset = message.offset.min(source.len());
        let length = message
            .raw
            .len()
            .min(source.len() - offset)
            .max(usize::from(offset < source.len()));
        Self {
            message: format!("[{}] {}", message.rule_id, message.message),
            help: Some(format!("reported as {}", message.severity)),
            source_code: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, length)),
            rule_id: message.rule_id.clone(),
        }
    }
}
