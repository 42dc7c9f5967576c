//! Inline configuration directives.
//!
//! Supports comments like:
//! ```text
//! <!-- htmlhint alt-require:error, tag-pair:off -->
//! <!-- htmlhint id-unique -->
//! <!-- htmlhint -->
//! ```
//!
//! A clause without a severity means `error`. A directive with no clauses
//! at all resets every inline override back to the base configuration.

use crate::token::{Position, Token};
use crate::types::Severity;
use tracing::warn;

/// Directive keyword, matched case-insensitively at the start of a comment.
pub const DIRECTIVE_KEYWORD: &str = "htmlhint";

/// What a directive changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaKind {
    /// Sets one rule's severity.
    RuleOverride {
        /// Rule id.
        rule_id: String,
        /// New severity.
        severity: Severity,
    },
    /// Discards all earlier inline overrides.
    ResetAll,
}

/// A configuration change anchored to a source position.
///
/// The anchor is the position just past the directive comment, so the
/// change applies from the next token onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDelta {
    /// First position the change applies to.
    pub anchor: Position,
    /// The change itself.
    pub kind: DeltaKind,
}

/// Extracts directives from a token stream, in anchor order.
pub fn extract_directives<'t, 'a: 't, I>(tokens: I) -> Vec<ConfigurationDelta>
where
    I: IntoIterator<Item = &'t Token<'a>>,
{
    let mut deltas = Vec::new();
    for token in tokens {
        let Some(content) = token.comment() else {
            continue;
        };
        let Some(kinds) = parse_directive(content) else {
            continue;
        };
        deltas.extend(kinds.into_iter().map(|kind| ConfigurationDelta {
            anchor: token.end,
            kind,
        }));
    }
    deltas
}

/// Parses the text of a comment as a directive.
///
/// Returns `None` when the comment is not a directive. A directive with no
/// clauses yields a single [`DeltaKind::ResetAll`].
#[must_use]
pub fn parse_directive(content: &str) -> Option<Vec<DeltaKind>> {
    let trimmed = content.trim();
    let head = trimmed.get(..DIRECTIVE_KEYWORD.len())?;
    if !head.eq_ignore_ascii_case(DIRECTIVE_KEYWORD) {
        return None;
    }
    let rest = &trimmed[DIRECTIVE_KEYWORD.len()..];
    if rest.chars().next().is_some_and(|ch| !ch.is_whitespace()) {
        // e.g. "htmlhintrc"
        return None;
    }

    // "id : level" is one clause
    let tightened = rest.split(':').map(str::trim).collect::<Vec<_>>().join(":");
    let clauses: Vec<&str> = tightened
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|clause| !clause.is_empty())
        .collect();

    if clauses.is_empty() {
        return Some(vec![DeltaKind::ResetAll]);
    }

    let kinds = clauses
        .into_iter()
        .filter_map(|clause| {
            let (rule_id, literal) = match clause.split_once(':') {
                Some((id, literal)) => (id.trim(), Some(literal.trim())),
                None => (clause, None),
            };
            if rule_id.is_empty() {
                warn!("Ignoring directive clause without a rule id: {clause}");
                return None;
            }
            let severity = match literal {
                None => Severity::Error,
                Some(literal) => {
                    if let Some(severity) = Severity::from_literal(literal) {
                        severity
                    } else {
                        warn!("Ignoring directive clause with unknown severity: {clause}");
                        return None;
                    }
                }
            };
            Some(DeltaKind::RuleOverride {
                rule_id: rule_id.to_string(),
                severity,
            })
        })
        .collect();

    Some(kinds)
}
