//! Human-readable rendering of messages.
//!
//! Each message becomes two lines: a header with position, severity, rule
//! and text, and a context line showing a window of the offending source
//! line around the reported column.

use crate::types::{Message, Severity};
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthChar;

/// Default printable width of the context window.
pub const DEFAULT_MAX_WIDTH: usize = 60;

/// Marker for text cut from either side of the context window.
pub const ELLIPSIS: &str = "...";

/// Options for [`format_messages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Emit ANSI color escapes.
    pub colors: bool,
    /// Number of leading spaces on every line.
    pub indent: usize,
    /// Printable columns available to the context window, ellipses excluded.
    pub max_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            colors: false,
            indent: 0,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl FormatOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables colors.
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the indent.
    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the context window width. Values below 2 are raised to 2 so a
    /// wide character always fits.
    #[must_use]
    pub fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }
}

/// Renders `messages` as output lines, two per message, in input order.
#[must_use]
pub fn format_messages(messages: &[Message], options: &FormatOptions) -> Vec<String> {
    let mut lines = Vec::with_capacity(messages.len() * 2);
    for message in messages {
        lines.push(header_line(message, options));
        lines.push(context_line(message, options));
    }
    lines
}

fn header_line(message: &Message, options: &FormatOptions) -> String {
    let indent = " ".repeat(options.indent);
    let label = format!("L{} ", message.line);
    let severity = message.severity.as_str();
    let rest = format!("[{}] {}", message.rule_id, message.message);

    if !options.colors {
        return format!("{indent}{label}{severity} {rest}");
    }
    let severity = match message.severity {
        Severity::Error => severity.red().bold().to_string(),
        Severity::Warning => severity.yellow().bold().to_string(),
        Severity::Off => severity.to_string(),
    };
    format!("{indent}{}{severity} {rest}", label.white())
}

fn context_line(message: &Message, options: &FormatOptions) -> String {
    let window = ContextWindow::new(&message.evidence, message.col, options.max_width);
    let body = window.render();
    let indent = " ".repeat(options.indent);
    if options.colors {
        format!("{indent}{}", body.dimmed())
    } else {
        format!("{indent}{body}")
    }
}

/// Printable width of a character: 2 for wide characters, otherwise 1.
#[must_use]
pub fn char_width(ch: char) -> usize {
    if ch.width() == Some(2) {
        2
    } else {
        1
    }
}

/// A slice of a source line centered on a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    /// Visible text, tabs replaced by spaces.
    pub text: String,
    /// Printable width of `text`.
    pub width: usize,
    /// Characters before the window were cut.
    pub clipped_left: bool,
    /// Characters after the window were cut.
    pub clipped_right: bool,
}

impl ContextWindow {
    /// Builds the window of `line` around the 1-indexed `col`.
    ///
    /// The column is clamped into the line, so any value is accepted. The
    /// window always contains that column and never exceeds `max_width`
    /// printable columns (at least 2).
    #[must_use]
    pub fn new(line: &str, col: usize, max_width: usize) -> Self {
        let max_width = max_width.max(2);
        let chars: Vec<char> = line
            .chars()
            .map(|ch| if ch == '\t' { ' ' } else { ch })
            .collect();
        let widths: Vec<usize> = chars.iter().map(|&ch| char_width(ch)).collect();
        let total: usize = widths.iter().sum();

        if total <= max_width {
            return Self {
                text: chars.into_iter().collect(),
                width: total,
                clipped_left: false,
                clipped_right: false,
            };
        }

        let target = col.saturating_sub(1).min(chars.len() - 1);
        let mut start = target;
        let mut end = target + 1;
        let mut used = widths[target];

        // Up to half of the spare room goes left, the rest right, and
        // whatever the right side could not use goes back to the left.
        let left_budget = (max_width - used) / 2;
        let mut left_used = 0;
        while start > 0 && left_used + widths[start - 1] <= left_budget {
            start -= 1;
            left_used += widths[start];
        }
        used += left_used;
        while end < chars.len() && used + widths[end] <= max_width {
            used += widths[end];
            end += 1;
        }
        while start > 0 && used + widths[start - 1] <= max_width {
            start -= 1;
            used += widths[start];
        }

        Self {
            text: chars[start..end].iter().collect(),
            width: used,
            clipped_left: start > 0,
            clipped_right: end < chars.len(),
        }
    }

    /// The window with ellipses on the clipped sides.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 2 * ELLIPSIS.len());
        if self.clipped_left {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&self.text);
        if self.clipped_right {
            out.push_str(ELLIPSIS);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Position;

    fn message(line: usize, col: usize, evidence: &str) -> Message {
        Message::new(
            "tag-pair",
            Severity::Error,
            Position::new(0, line, col),
            "Tag must be paired, no start tag: [ </p> ]",
        )
        .with_evidence(evidence)
    }

    #[test]
    fn empty_input_formats_to_nothing() {
        assert!(format_messages(&[], &FormatOptions::default()).is_empty());
    }

    #[test]
    fn two_lines_per_message() {
        let messages = vec![message(1, 1, "<p>"), message(2, 3, ""), message(9, 99, "x")];
        assert_eq!(format_messages(&messages, &FormatOptions::default()).len(), 6);
    }

    #[test]
    fn plain_header_and_context() {
        let lines = format_messages(&[message(3, 2, "a</p>")], &FormatOptions::new());
        insta::assert_snapshot!(lines[0].as_str(), @"L3 error [tag-pair] Tag must be paired, no start tag: [ </p> ]");
        insta::assert_snapshot!(lines[1].as_str(), @"a</p>");

        let indented = format_messages(&[message(3, 2, "a</p>")], &FormatOptions::new().indent(2));
        assert_eq!(indented[0], format!("  {}", lines[0]));
        assert_eq!(indented[1], "  a</p>");
    }

    #[test]
    fn colored_header_starts_with_white_label() {
        let lines = format_messages(
            &[message(1, 1, "<p>")],
            &FormatOptions::new().colors(true).indent(4),
        );
        assert!(lines[0].starts_with("    \x1b[37mL1 \x1b[39m"));
        assert!(lines[0].contains("\x1b[31m"));
        assert!(lines[1].starts_with("    \x1b[2m"));
    }

    #[test]
    fn short_line_is_not_clipped() {
        let window = ContextWindow::new("<img src=\"a.gif\">", 5, 60);
        assert_eq!(window.render(), "<img src=\"a.gif\">");
        assert!(!window.clipped_left && !window.clipped_right);
    }

    #[test]
    fn long_line_is_clipped_on_both_sides() {
        let line = format!("{}X{}", "a".repeat(50), "b".repeat(50));
        let window = ContextWindow::new(&line, 51, 11);
        assert_eq!(window.text, "aaaaaXbbbbb");
        assert_eq!(window.render(), "...aaaaaXbbbbb...");
    }

    #[test]
    fn window_near_start_only_clips_right() {
        let line = "x".repeat(100);
        let window = ContextWindow::new(&line, 1, 10);
        assert!(!window.clipped_left);
        assert!(window.clipped_right);
        assert_eq!(window.width, 10);
    }

    #[test]
    fn window_near_end_gives_spare_room_to_the_left() {
        let line = "y".repeat(100);
        let window = ContextWindow::new(&line, 100, 10);
        assert!(window.clipped_left);
        assert!(!window.clipped_right);
        assert_eq!(window.width, 10);
    }

    #[test]
    fn wide_characters_count_double() {
        let line = "中".repeat(30);
        let window = ContextWindow::new(&line, 15, 9);
        assert_eq!(window.width, 8);
        assert_eq!(window.text.chars().count(), 4);
        assert!(window.clipped_left && window.clipped_right);
    }

    #[test]
    fn out_of_range_column_is_clamped() {
        let line = "z".repeat(80);
        let window = ContextWindow::new(&line, 500, 20);
        assert!(window.clipped_left);
        assert!(!window.clipped_right);
        let window = ContextWindow::new(&line, 0, 20);
        assert!(!window.clipped_left);
    }

    #[test]
    fn tiny_width_still_fits_a_wide_char() {
        let window = ContextWindow::new("ab中cd", 3, 0);
        assert_eq!(window.text, "中");
        assert_eq!(window.render(), "...中...");
    }

    #[test]
    fn tabs_render_as_spaces() {
        let window = ContextWindow::new("\t<p>", 2, 60);
        assert_eq!(window.text, " <p>");
    }

    #[test]
    fn window_never_exceeds_max_width() {
        let line = "ab中文cd\tef漢字".repeat(12);
        for max_width in 2..40 {
            for col in 0..line.chars().count() + 3 {
                let window = ContextWindow::new(&line, col, max_width);
                assert!(window.width <= max_width);
                let widths: usize = window.text.chars().map(char_width).sum();
                assert_eq!(widths, window.width);
            }
        }
    }
}
