//! Resolution of the ruleset in effect at a document position.
//!
//! The base ruleset comes from the caller's [`Configuration`]. Inline
//! directives are folded on top of it as an ordered list of anchored
//! deltas; nothing is mutated in place, so the ruleset at any position can
//! be recomputed independently.

use crate::config::{ConfigError, Configuration, PresetCatalog, Ruleset, DEFAULT_PRESET};
use crate::directive::{ConfigurationDelta, DeltaKind};
use crate::token::Position;
use tracing::debug;

/// Computes the ruleset in effect before any inline directive.
///
/// 1. Presets listed in `extends` are merged left to right.
/// 2. Otherwise, a present `rules` map (even an empty one) starts from nothing.
/// 3. Otherwise, the default preset applies.
/// 4. Explicit `rules` entries are applied last and always win.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] if a preset is missing from `catalog`.
pub fn resolve_base(config: &Configuration, catalog: &PresetCatalog) -> Result<Ruleset, ConfigError> {
    let mut base = Ruleset::new();

    if !config.extends.is_empty() {
        for name in &config.extends {
            let preset = catalog.get(name).ok_or_else(|| ConfigError::UnknownPreset {
                name: name.clone(),
            })?;
            base.extend_from(&preset.ruleset);
        }
    } else if config.rules.is_none() {
        let preset = catalog
            .get(DEFAULT_PRESET)
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: DEFAULT_PRESET.to_string(),
            })?;
        base.extend_from(&preset.ruleset);
    }

    if let Some(rules) = &config.rules {
        base.extend_from(rules);
    }

    debug!("Resolved base ruleset with {} entries", base.len());
    Ok(base)
}

/// Computes the ruleset in effect at `position`.
///
/// Deltas anchored at or before `position` are applied in order; a
/// [`DeltaKind::ResetAll`] discards every override seen so far.
#[must_use]
pub fn effective_at(position: Position, base: &Ruleset, deltas: &[ConfigurationDelta]) -> Ruleset {
    let applied = deltas.partition_point(|delta| delta.anchor <= position);
    let active = &deltas[..applied];
    let since_reset = active
        .iter()
        .rposition(|delta| delta.kind == DeltaKind::ResetAll)
        .map_or(active, |idx| &active[idx + 1..]);

    let mut ruleset = base.clone();
    for delta in since_reset {
        if let DeltaKind::RuleOverride { rule_id, severity } = &delta.kind {
            ruleset.set(rule_id.clone(), *severity);
        }
    }
    ruleset
}

/// Source of the ruleset in effect at a position, queried in token order.
pub trait RulesetSource {
    /// Returns the ruleset in effect at `position`.
    fn ruleset_at(&mut self, position: Position) -> &Ruleset;
}

/// Incremental [`RulesetSource`] for positions visited in ascending order.
///
/// Keeps the last computed ruleset and only applies deltas as their anchors
/// are passed. Querying an earlier position falls back to a full recompute.
#[derive(Debug, Clone)]
pub struct RulesetCursor<'d> {
    base: Ruleset,
    deltas: &'d [ConfigurationDelta],
    current: Ruleset,
    applied: usize,
    last: Position,
}

impl<'d> RulesetCursor<'d> {
    /// Creates a cursor positioned at the start of the document.
    #[must_use]
    pub fn new(base: Ruleset, deltas: &'d [ConfigurationDelta]) -> Self {
        Self {
            current: base.clone(),
            base,
            deltas,
            applied: 0,
            last: Position::START,
        }
    }

    /// The base ruleset this cursor folds deltas onto.
    #[must_use]
    pub fn base(&self) -> &Ruleset {
        &self.base
    }
}

impl RulesetSource for RulesetCursor<'_> {
    fn ruleset_at(&mut self, position: Position) -> &Ruleset {
        if position < self.last {
            self.current = effective_at(position, &self.base, self.deltas);
            self.applied = self
                .deltas
                .partition_point(|delta| delta.anchor <= position);
        } else {
            while let Some(delta) = self.deltas.get(self.applied) {
                if delta.anchor > position {
                    break;
                }
                match &delta.kind {
                    DeltaKind::ResetAll => self.current = self.base.clone(),
                    DeltaKind::RuleOverride { rule_id, severity } => {
                        self.current.set(rule_id.clone(), *severity);
                    }
                }
                self.applied += 1;
            }
        }
        self.last = position;
        &self.current
    }
}

/// A fixed ruleset for every position, used when there are no directives.
impl RulesetSource for Ruleset {
    fn ruleset_at(&mut self, _position: Position) -> &Ruleset {
        self
    }
}
