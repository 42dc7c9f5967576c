//! End-to-end tests over a deliberately malformed document.

use htmlhint_core::{
    extract_directives, scan, Configuration, DeltaKind, LineIndex, Linter, Rule, RuleContext,
    RuleError, Severity, Token, TokenKind,
};
use std::path::PathBuf;

fn fixture() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/malformed.html");
    std::fs::read_to_string(path).unwrap()
}

#[derive(Default)]
struct CountTags;

impl Rule for CountTags {
    fn id(&self) -> &'static str {
        "count-tags"
    }

    fn applies_to(&self, kind: TokenKind) -> bool {
        kind == TokenKind::StartTag
    }

    fn check(&mut self, token: &Token<'_>, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let name = token.tag_name().unwrap_or_default();
        ctx.report(token.position, format!("<{name}>"), token.raw);
        Ok(())
    }
}

#[test]
fn tokens_cover_the_whole_source() {
    let source = fixture();
    let tokens: Vec<_> = scan(&source).collect();

    let rebuilt: String = tokens.iter().map(|t| t.raw).collect();
    assert_eq!(rebuilt, source);

    for pair in tokens.windows(2) {
        assert_eq!(pair[0].end, pair[1].position);
    }
}

#[test]
fn script_body_is_a_single_text_token() {
    let source = fixture();
    let tokens: Vec<_> = scan(&source).collect();

    let script = tokens
        .iter()
        .position(|t| t.tag_name() == Some("script"))
        .unwrap();
    let body = &tokens[script + 1];
    assert_eq!(body.kind(), TokenKind::Text);
    assert_eq!(body.raw, r#"if (a < b) { document.write("</div>"); }"#);
    assert_eq!(tokens[script + 2].kind(), TokenKind::EndTag);
    assert!(!tokens.iter().any(|t| t.tag_name() == Some("div") && t.line() == 5));
}

#[test]
fn duplicate_attributes_are_preserved() {
    let source = fixture();
    let body = scan(&source)
        .find(|t| t.tag_name() == Some("body"))
        .unwrap();
    let tag = body.as_start_tag().unwrap();

    let names: Vec<_> = tag.attributes.iter().map(|a| a.name).collect();
    assert_eq!(names, ["class", "data-x", "data-x"]);
    assert_eq!(tag.attributes[0].value, "main");
    assert_eq!(tag.attributes[1].value, "1");
    assert_eq!(tag.attributes[2].value, "2");
    assert_eq!(tag.attributes[2].position.line, 7);
    assert_eq!(tag.attributes[2].position.col, 29);
}

#[test]
fn multi_line_attribute_advances_lines() {
    let source = fixture();
    let tokens: Vec<_> = scan(&source).collect();

    let p = tokens.iter().position(|t| t.tag_name() == Some("p")).unwrap();
    assert_eq!(tokens[p].line(), 9);
    assert_eq!(tokens[p].end.line, 10);

    let text = &tokens[p + 1];
    assert_eq!(text.raw, "text > more");
    assert_eq!((text.line(), text.col()), (10, 11));
}

#[test]
fn unterminated_constructs_are_recovered() {
    let source = fixture();
    let tokens: Vec<_> = scan(&source).collect();

    // `<img` is cut short by the `<div>` on the next line.
    let img = tokens.iter().find(|t| t.tag_name() == Some("img")).unwrap();
    assert_eq!(img.as_start_tag().unwrap().attributes.len(), 1);
    let div = tokens.iter().find(|t| t.tag_name() == Some("div")).unwrap();
    assert_eq!((div.line(), div.col()), (12, 3));

    let last = tokens.last().unwrap();
    assert_eq!(last.comment(), Some(" comment\n"));
    assert_eq!(last.end.offset, source.len());
}

#[test]
fn directive_is_extracted() {
    let source = fixture();
    let tokens: Vec<_> = scan(&source).collect();
    let deltas = extract_directives(&tokens);

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].anchor.line, 8);
    assert_eq!(
        deltas[0].kind,
        DeltaKind::RuleOverride {
            rule_id: "count-tags".to_string(),
            severity: Severity::Warning,
        }
    );
}

#[test]
fn directive_downgrades_later_tags() {
    let source = fixture();
    let linter = Linter::builder().rule::<CountTags>().build();
    let config = Configuration::new().rule("count-tags", Severity::Error);

    let messages = linter.verify(&source, &config).unwrap();
    let summary: Vec<_> = messages
        .iter()
        .map(|m| (m.message.as_str(), m.severity))
        .collect();
    assert_eq!(
        summary,
        [
            ("<html>", Severity::Error),
            ("<head>", Severity::Error),
            ("<title>", Severity::Error),
            ("<script>", Severity::Error),
            ("<body>", Severity::Error),
            ("<p>", Severity::Warning),
            ("<img>", Severity::Warning),
            ("<div>", Severity::Warning),
        ]
    );

    let lines = LineIndex::new(&source);
    for message in &messages {
        assert_eq!(message.evidence, lines.line(message.line).unwrap());
    }
}
