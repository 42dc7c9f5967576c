//! Check command implementation.

use anyhow::{Context, Result};
use htmlhint::{count_by_severity, Configuration, Message, Severity};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigResolver;
use crate::OutputFormat;

/// File extensions linted when walking directories.
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Messages for one linted file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path as discovered.
    pub file: PathBuf,
    /// File contents, kept for rendering source context.
    #[serde(skip)]
    pub source: String,
    /// Messages in document order.
    pub messages: Vec<Message>,
}

/// Runs the check command.
///
/// A `--rules` filter applies to every file; otherwise each file uses the
/// configuration resolved for it.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: &[String],
    config_path: Option<&Path>,
) -> Result<()> {
    let filter = rules_filter.map(parse_rules_filter).transpose()?;
    let mut resolver = ConfigResolver::new(config_path)?;

    let files = discover_files(paths, exclude)?;
    tracing::info!("Linting {} file(s)", files.len());

    let reports = lint_files(files, filter.as_ref(), &mut resolver)?;
    super::output::print(&reports, format)?;

    let has_errors = reports
        .iter()
        .any(|report| count_by_severity(&report.messages).0 > 0);
    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn lint_files(
    files: Vec<PathBuf>,
    filter: Option<&Configuration>,
    resolver: &mut ConfigResolver,
) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let config = match filter {
            Some(config) => config,
            None => {
                let loaded = resolver.config_for(&file)?;
                tracing::debug!("Config for {}: {:?}", file.display(), loaded.origin);
                &loaded.config
            }
        };
        let messages = htmlhint::verify(&content, Some(config))
            .with_context(|| format!("Failed to lint {}", file.display()))?;
        reports.push(FileReport {
            file,
            source: content,
            messages,
        });
    }
    Ok(reports)
}

/// Builds a configuration that runs exactly the listed rules.
///
/// Clauses are `id` or `id:severity`; a bare id means error.
fn parse_rules_filter(filter: &str) -> Result<Configuration> {
    let linter = htmlhint::linter();
    let mut config = Configuration::new().no_rules();

    for clause in filter.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let (id, severity) = match clause.split_once(':') {
            Some((id, literal)) => {
                let severity = Severity::from_literal(literal.trim())
                    .with_context(|| format!("Invalid severity in --rules: {clause}"))?;
                (id.trim(), severity)
            }
            None => (clause, Severity::Error),
        };

        if linter.rules().iter().any(|rule| rule.id == id) {
            config = config.rule(id, severity);
        } else {
            tracing::warn!("Unknown rule: {}", id);
        }
    }

    Ok(config)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

fn is_excluded(path: &Path, root: &Path, exclude: &[String]) -> bool {
    let rel_str = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    exclude.iter().any(|pattern| {
        let clean = pattern.replace("**/", "").replace("/**", "");
        !clean.is_empty() && rel_str.contains(&clean)
    })
}

/// Collects HTML files under `paths`, honoring `.gitignore`.
///
/// Files given explicitly are linted whatever their extension.
fn discover_files(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();

            if !path.is_file() || !is_html(path) {
                continue;
            }
            if is_excluded(path, root, exclude) {
                tracing::debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rules_filter_enables_only_listed_rules() {
        let config = parse_rules_filter("alt-require, tag-pair:warning,no-such-rule").unwrap();
        assert!(config.extends.is_empty());
        let rules = config.rules.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("alt-require"), Some(Severity::Error));
        assert_eq!(rules.get("tag-pair"), Some(Severity::Warning));
    }

    #[test]
    fn rules_filter_rejects_bad_severity() {
        assert!(parse_rules_filter("alt-require:loud").is_err());
    }

    #[test]
    fn discovers_html_files_and_applies_excludes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("site/vendor")).unwrap();
        fs::write(tmp.path().join("site/index.html"), "<p>").unwrap();
        fs::write(tmp.path().join("site/about.HTM"), "<p>").unwrap();
        fs::write(tmp.path().join("site/style.css"), "p {}").unwrap();
        fs::write(tmp.path().join("site/vendor/lib.html"), "<p>").unwrap();

        let files = discover_files(&[tmp.path().to_path_buf()], &["**/vendor/**".to_string()])
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["about.HTM", "index.html"]);
    }

    #[test]
    fn explicit_files_are_always_linted() {
        let tmp = TempDir::new().unwrap();
        let page = tmp.path().join("page.xhtml");
        fs::write(&page, "<p>").unwrap();
        assert_eq!(discover_files(&[page.clone()], &[]).unwrap(), [page]);
    }

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("legacy")).unwrap();
        fs::write(
            tmp.path().join(".htmlhintrc"),
            r#"{"rules": {"alt-require": "error"}}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("legacy/.htmlhintrc"),
            r#"{"rules": {"alt-require": "off"}}"#,
        )
        .unwrap();
        fs::write(tmp.path().join("index.html"), "<img src=\"a.png\">").unwrap();
        fs::write(tmp.path().join("legacy/old.html"), "<img src=\"a.png\">").unwrap();
        tmp
    }

    #[test]
    fn each_file_uses_its_nearest_config() {
        let tmp = site();
        let files = discover_files(&[tmp.path().to_path_buf()], &[]).unwrap();
        let mut resolver = ConfigResolver::new(None).unwrap();

        let reports = lint_files(files, None, &mut resolver).unwrap();
        let counts: Vec<_> = reports.iter().map(|r| r.messages.len()).collect();
        assert_eq!(counts, [1, 0]);
        assert_eq!(reports[0].messages[0].rule_id, "alt-require");
    }

    #[test]
    fn rules_filter_overrides_file_configs() {
        let tmp = site();
        let files = discover_files(&[tmp.path().to_path_buf()], &[]).unwrap();
        let filter = parse_rules_filter("alt-require:warning").unwrap();
        let mut resolver = ConfigResolver::new(None).unwrap();

        let reports = lint_files(files, Some(&filter), &mut resolver).unwrap();
        for report in &reports {
            assert_eq!(report.messages.len(), 1);
            assert_eq!(report.messages[0].severity, Severity::Warning);
        }
    }
}
