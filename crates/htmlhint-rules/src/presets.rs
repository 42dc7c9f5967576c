//! Rule presets shipped with htmlhint.

use crate::{
    AltRequire, AttrLowercase, AttrNoDuplication, AttrValueDoubleQuotes, DoctypeFirst, IdUnique,
    SpecCharEscape, SrcNotEmpty, TagPair, TagnameLowercase, TitleRequire,
};
use htmlhint_core::{Linter, Preset, PresetCatalog, RuleBox, RuleFactory, Ruleset, Severity};

/// Rules every preset enables, and the severity `recommended` gives them.
const PRESET_RULES: &[(&str, Severity)] = &[
    ("tagname-lowercase", Severity::Error),
    ("attr-lowercase", Severity::Error),
    ("attr-value-double-quotes", Severity::Error),
    ("doctype-first", Severity::Error),
    ("tag-pair", Severity::Error),
    ("spec-char-escape", Severity::Error),
    ("id-unique", Severity::Error),
    ("src-not-empty", Severity::Error),
    ("attr-no-duplication", Severity::Error),
    ("title-require", Severity::Error),
];

/// Purely stylistic rules, reported as warnings by `legacy`.
const STYLISTIC_RULES: &[&str] = &[
    "tagname-lowercase",
    "attr-lowercase",
    "attr-value-double-quotes",
    "doctype-first",
];

/// Built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPreset {
    /// Structural and style rules, all at error.
    Recommended,
    /// The same rules, with the stylistic ones downgraded to warnings.
    Legacy,
}

impl BuiltinPreset {
    /// All built-in presets.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::Legacy];

    /// Preset name, without the `htmlhint:` namespace.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Legacy => "legacy",
        }
    }

    /// Short description for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Recommended => "Structural and style rules, all reported as errors",
            Self::Legacy => "Structural rules as errors, stylistic rules as warnings",
        }
    }

    /// Returns the ruleset of this preset.
    #[must_use]
    pub fn ruleset(self) -> Ruleset {
        PRESET_RULES
            .iter()
            .map(|&(id, severity)| match self {
                Self::Legacy if STYLISTIC_RULES.contains(&id) => (id, Severity::Warning),
                _ => (id, severity),
            })
            .collect()
    }

    /// Returns this preset as a catalog entry.
    #[must_use]
    pub fn preset(self) -> Preset {
        Preset {
            name: self.name(),
            description: self.description(),
            ruleset: self.ruleset(),
        }
    }
}

/// Returns a catalog holding every built-in preset.
#[must_use]
pub fn preset_catalog() -> PresetCatalog {
    BuiltinPreset::ALL
        .into_iter()
        .fold(PresetCatalog::new(), |catalog, preset| {
            catalog.with(preset.preset())
        })
}

fn boxed<R: htmlhint_core::Rule + Default + 'static>() -> RuleBox {
    Box::new(R::default())
}

/// Returns factories for all available rules, in dispatch order.
#[must_use]
pub fn all_rules() -> Vec<RuleFactory> {
    vec![
        boxed::<AltRequire>,
        boxed::<AttrLowercase>,
        boxed::<AttrNoDuplication>,
        boxed::<AttrValueDoubleQuotes>,
        boxed::<DoctypeFirst>,
        boxed::<IdUnique>,
        boxed::<SpecCharEscape>,
        boxed::<SrcNotEmpty>,
        boxed::<TagPair>,
        boxed::<TagnameLowercase>,
        boxed::<TitleRequire>,
    ]
}

/// Returns a linter with every built-in rule and preset registered.
#[must_use]
pub fn default_linter() -> Linter {
    all_rules()
        .into_iter()
        .fold(Linter::builder(), htmlhint_core::LinterBuilder::rule_factory)
        .presets(preset_catalog())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        for preset in BuiltinPreset::ALL {
            assert_eq!(preset.ruleset().len(), PRESET_RULES.len());
        }
    }

    #[test]
    fn test_recommended_is_all_errors() {
        let ruleset = BuiltinPreset::Recommended.ruleset();
        assert!(ruleset.iter().all(|(_, severity)| severity == Severity::Error));
        assert!(!ruleset.is_active("alt-require"));
    }

    #[test]
    fn test_legacy_downgrades_style_rules() {
        let ruleset = BuiltinPreset::Legacy.ruleset();
        assert_eq!(ruleset.get("attr-lowercase"), Some(Severity::Warning));
        assert_eq!(ruleset.get("tag-pair"), Some(Severity::Error));
    }

    #[test]
    fn test_every_preset_rule_is_registered() {
        let linter = default_linter();
        for (id, _) in BuiltinPreset::Recommended.ruleset().iter() {
            assert!(linter.rules().iter().any(|rule| rule.id == id), "{id}");
        }
        assert_eq!(linter.rule_count(), 11);
    }

    #[test]
    fn test_catalog_resolves_namespaced_names() {
        let catalog = preset_catalog();
        assert_eq!(catalog.get("htmlhint:legacy").map(|p| p.name), Some("legacy"));
        assert!(catalog.get("recommended").is_some());
    }
}
