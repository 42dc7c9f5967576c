//! Shared output formatting for lint results.

use anyhow::Result;
use htmlhint::{count_by_severity, format_messages, FormatOptions, Message, MessageDiagnostic};
use owo_colors::OwoColorize;

use super::check::FileReport;
use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(reports: &[FileReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(reports),
        OutputFormat::Json => return print_json(reports),
        OutputFormat::Compact => print_compact(reports),
        OutputFormat::Fancy => print_fancy(reports),
    }
    Ok(())
}

fn totals(reports: &[FileReport]) -> (usize, usize) {
    reports.iter().fold((0, 0), |(errors, warnings), report| {
        let (e, w) = count_by_severity(&report.messages);
        (errors + e, warnings + w)
    })
}

fn print_summary(reports: &[FileReport]) {
    let (errors, warnings) = totals(reports);
    let summary = format!(
        "Found {errors} error(s), {warnings} warning(s) in {} file(s)",
        reports.len()
    );
    if errors > 0 {
        println!("{}", summary.red());
    } else if warnings > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
}

fn print_text(reports: &[FileReport]) {
    for line in text_lines(reports) {
        println!("{line}");
    }
    print_summary(reports);
}

/// File heading, message lines, then a blank line, for each file with messages.
fn text_lines(reports: &[FileReport]) -> Vec<String> {
    let options = FormatOptions::new().colors(true).indent(4);

    let mut lines = Vec::new();
    for report in reports.iter().filter(|r| !r.messages.is_empty()) {
        lines.push(report.file.display().bold().to_string());
        lines.extend(format_messages(&report.messages, Some(&options)));
        lines.push(String::new());
    }
    lines
}

fn print_json(reports: &[FileReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{json}");
    Ok(())
}

fn print_compact(reports: &[FileReport]) {
    for report in reports {
        for message in &report.messages {
            println!("{}", compact_line(report, message));
        }
    }
}

fn compact_line(report: &FileReport, message: &Message) -> String {
    format!(
        "{}:{}:{}: {} [{}] {}",
        report.file.display(),
        message.line,
        message.col,
        message.severity,
        message.rule_id,
        message.message,
    )
}

fn print_fancy(reports: &[FileReport]) {
    for report in reports {
        let name = report.file.display().to_string();
        for message in &report.messages {
            let diagnostic = MessageDiagnostic::new(message, &name, &report.source);
            println!("{:?}", miette::Report::new(diagnostic));
        }
    }

    print_summary(reports);
}
