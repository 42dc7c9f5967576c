//! The rule engine: dispatches tokens to active rules.

use crate::config::{ConfigError, Configuration, Preset, PresetCatalog, Ruleset};
use crate::directive::extract_directives;
use crate::resolver::{resolve_base, RulesetCursor, RulesetSource};
use crate::rule::{Rule, RuleBox, RuleContext, RuleError, RuleFactory};
use crate::scanner::{scan, LineIndex};
use crate::token::{Position, Token};
use crate::types::{Message, Severity};

use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can fail a whole lint call.
#[derive(Debug, Error)]
pub enum LintError {
    /// The configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A registered rule, described without instantiating it.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    /// Rule id.
    pub id: &'static str,
    /// Rule description.
    pub description: &'static str,
    factory: RuleFactory,
}

impl RuleInfo {
    /// Describes the rule produced by `factory`.
    #[must_use]
    pub fn new(factory: RuleFactory) -> Self {
        let sample = factory();
        Self {
            id: sample.id(),
            description: sample.description(),
            factory,
        }
    }

    /// Creates a fresh instance for one pass.
    #[must_use]
    pub fn instantiate(&self) -> RuleBox {
        (self.factory)()
    }
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleInfo>,
    presets: PresetCatalog,
}

impl LinterBuilder {
    /// Creates a new builder with no rules and no presets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule type. Dispatch order is registration order.
    #[must_use]
    pub fn rule<R: Rule + Default + 'static>(self) -> Self {
        self.rule_factory(|| -> RuleBox { Box::new(R::default()) })
    }

    /// Registers a rule through its factory.
    ///
    /// A rule with an id that is already registered replaces the earlier
    /// one in place.
    #[must_use]
    pub fn rule_factory(mut self, factory: RuleFactory) -> Self {
        let info = RuleInfo::new(factory);
        if let Some(existing) = self.rules.iter_mut().find(|r| r.id == info.id) {
            warn!("Rule {} registered twice, keeping the later one", info.id);
            *existing = info;
        } else {
            self.rules.push(info);
        }
        self
    }

    /// Adds a preset that `extends` entries can name.
    #[must_use]
    pub fn preset(mut self, preset: Preset) -> Self {
        self.presets = self.presets.with(preset);
        self
    }

    /// Replaces the preset catalog.
    #[must_use]
    pub fn presets(mut self, presets: PresetCatalog) -> Self {
        self.presets = presets;
        self
    }

    /// Builds the linter.
    #[must_use]
    pub fn build(self) -> Linter {
        Linter {
            rules: self.rules,
            presets: self.presets,
        }
    }
}

/// Runs the full pipeline over single documents.
///
/// A `Linter` holds only read-only registrations, so one instance can lint
/// many documents, from several threads at once.
///
/// Use [`Linter::builder()`] to construct an instance.
#[derive(Debug, Clone)]
pub struct Linter {
    rules: Vec<RuleInfo>,
    presets: PresetCatalog,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Registered rules in dispatch order.
    #[must_use]
    pub fn rules(&self) -> &[RuleInfo] {
        &self.rules
    }

    /// The preset catalog.
    #[must_use]
    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// Computes the base ruleset for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `extends` names an unknown preset.
    pub fn resolve(&self, config: &Configuration) -> Result<Ruleset, ConfigError> {
        resolve_base(config, &self.presets)
    }

    /// Lints one document.
    ///
    /// The configuration is resolved before anything is scanned, so an
    /// unknown preset fails the call without producing messages.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Config`] if the configuration cannot be resolved.
    pub fn verify(&self, source: &str, config: &Configuration) -> Result<Vec<Message>, LintError> {
        let mut base = self.resolve(config)?;
        for info in &self.rules {
            if !base.is_active(info.id) {
                debug!("Rule {} is off in the base configuration", info.id);
            }
        }

        let tokens: Vec<Token<'_>> = scan(source).collect();
        let deltas = extract_directives(&tokens);
        debug!(
            "Scanned {} tokens with {} directive deltas",
            tokens.len(),
            deltas.len()
        );

        let lines = LineIndex::new(source);
        let messages = if deltas.is_empty() {
            self.lint(&tokens, &lines, &mut base)
        } else {
            let mut cursor = RulesetCursor::new(base, &deltas);
            self.lint(&tokens, &lines, &mut cursor)
        };

        info!("Lint complete: {} messages", messages.len());
        Ok(messages)
    }

    /// Dispatches `tokens` to every active rule.
    ///
    /// `rulesets` is queried once per token, in token order, and once more at
    /// the end of the document for the [`Rule::finish`] hooks. Rules are
    /// instantiated fresh for this call.
    #[must_use]
    pub fn lint<S: RulesetSource>(
        &self,
        tokens: &[Token<'_>],
        lines: &LineIndex<'_>,
        rulesets: &mut S,
    ) -> Vec<Message> {
        let mut rules: Vec<RuleBox> = self.rules.iter().map(RuleInfo::instantiate).collect();
        let mut messages = Vec::new();

        for token in tokens {
            let ruleset = rulesets.ruleset_at(token.position);
            let kind = token.kind();
            for rule in &mut rules {
                let severity = ruleset.severity(rule.id());
                if !severity.is_active() || !rule.applies_to(kind) {
                    continue;
                }
                dispatch(
                    rule.id(),
                    severity,
                    token.position,
                    token.raw,
                    lines,
                    &mut messages,
                    |ctx| rule.check(token, ctx),
                );
            }
        }

        let end = tokens.last().map_or(Position::START, |t| t.end);
        let ruleset = rulesets.ruleset_at(end);
        for rule in &mut rules {
            let severity = ruleset.severity(rule.id());
            if severity.is_active() {
                dispatch(rule.id(), severity, end, "", lines, &mut messages, |ctx| {
                    rule.finish(ctx)
                });
            }
        }

        messages
    }
}

/// Runs one rule invocation, turning an error or panic into a message.
fn dispatch<F>(
    rule_id: &'static str,
    severity: Severity,
    position: Position,
    raw: &str,
    lines: &LineIndex<'_>,
    messages: &mut Vec<Message>,
    invoke: F,
) where
    F: FnOnce(&mut RuleContext<'_>) -> Result<(), RuleError>,
{
    let mut ctx = RuleContext::new(rule_id, severity, lines, messages);
    let error = match panic::catch_unwind(AssertUnwindSafe(|| invoke(&mut ctx))) {
        Ok(Ok(())) => return,
        Ok(Err(error)) => error,
        Err(payload) => RuleError::from_panic(&*payload),
    };
    warn!("Rule {rule_id} failed at {position}: {error}");
    ctx.report(position, format!("Rule execution failed: {error}"), raw);
}
