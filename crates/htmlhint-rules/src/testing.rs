//! Helpers shared by the rule tests.

use htmlhint_core::{Configuration, Linter, Message, Rule, Severity};

/// Lints `source` with only `R` enabled, at error severity.
pub fn check<R: Rule + Default + 'static>(source: &str) -> Vec<Message> {
    let linter = Linter::builder().rule::<R>().build();
    let config = Configuration::new().rule(R::default().id(), Severity::Error);
    linter
        .verify(source, &config)
        .expect("explicit rules never fail to resolve")
}
