//! Fault-tolerant markup scanner.
//!
//! [`scan`] turns raw text into a lazy stream of [`Token`]s. Malformed input
//! never fails: stray `>` characters become text, unterminated tags,
//! comments and quoted values are closed at end of input, and duplicate
//! attributes are kept so rules can see them.
//!
//! Every token consumes at least one byte, so a scan is bounded by the
//! source length.

use crate::token::{Attribute, Position, QuoteStyle, StartTag, Token, TokenData};
use thiserror::Error;

/// Elements whose content is scanned as a single text token.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Errors raised for position queries outside the source.
///
/// Malformed markup never produces a `ScanError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Byte offset past the end of the source.
    #[error("offset {offset} is outside the source (length {len})")]
    OffsetOutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Source length in bytes.
        len: usize,
    },

    /// Line number outside the source.
    #[error("line {line} is outside the source ({lines} lines)")]
    LineOutOfBounds {
        /// Requested line (1-indexed).
        line: usize,
        /// Number of lines in the source.
        lines: usize,
    },
}

/// Scans `source` into a lazy token stream.
///
/// The returned iterator is cheap to clone; a clone restarts nothing but
/// continues independently from the same point, and calling `scan` again
/// restarts from the beginning.
#[must_use]
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Lazy tokenizer over a source string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    cursor: Position,
    /// Set after a raw-text start tag such as `<script>`.
    raw_text_until: Option<&'static str>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Position::START,
            raw_text_until: None,
        }
    }

    /// The source being scanned.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Builds a token spanning `start..end` and moves the cursor to `end`.
    fn emit(&mut self, end: usize, data: TokenData<'a>) -> Token<'a> {
        let source = self.source;
        let start = self.cursor;
        let raw = &source[start.offset..end];
        let end_pos = start.advance(raw);
        self.cursor = end_pos;
        Token {
            position: start,
            end: end_pos,
            raw,
            data,
        }
    }

    fn scan_raw_text(&mut self, element: &'static str) -> Option<Token<'a>> {
        let source = self.source;
        let start = self.cursor.offset;
        let end = find_close_tag(source, start, element).unwrap_or(source.len());
        if end == start {
            return None;
        }
        Some(self.emit(end, TokenData::Text))
    }

    fn scan_comment(&mut self) -> Token<'a> {
        let source = self.source;
        let start = self.cursor.offset;
        let body = start + 4;
        let (content_end, end) = match source[body..].find("-->") {
            Some(idx) => (body + idx, body + idx + 3),
            None => (source.len(), source.len()),
        };
        let content = &source[body..content_end];
        self.emit(end, TokenData::Comment { content })
    }

    fn scan_cdata(&mut self) -> Token<'a> {
        let source = self.source;
        let start = self.cursor.offset;
        let end = source[start..]
            .find("]]>")
            .map_or(source.len(), |idx| start + idx + 3);
        self.emit(end, TokenData::Text)
    }

    /// `<!doctype ...>`, or a bogus comment like `<!foo>` / `<?xml ?>`.
    fn scan_declaration(&mut self) -> Token<'a> {
        let source = self.source;
        let start = self.cursor.offset;
        let close = source[start..].find('>').map(|idx| start + idx);
        let end = close.map_or(source.len(), |idx| idx + 1);
        let inner_end = close.unwrap_or(source.len());
        let inner = &source[start + 2..inner_end];

        if starts_with_ignore_case(&source[start..], "<!doctype") {
            self.emit(end, TokenData::Doctype)
        } else {
            let content = inner.strip_suffix('?').unwrap_or(inner);
            self.emit(end, TokenData::Comment { content })
        }
    }

    fn scan_end_tag(&mut self) -> Token<'a> {
        let source = self.source;
        let start = self.cursor.offset;
        let name_start = start + 2;
        let name_end = scan_name(self.bytes(), name_start);
        let name = &source[name_start..name_end];
        let end = source[name_end..]
            .find('>')
            .map_or(source.len(), |idx| name_end + idx + 1);
        self.emit(end, TokenData::EndTag { name })
    }

    fn scan_start_tag(&mut self) -> Token<'a> {
        let source = self.source;
        let bytes = self.bytes();
        let len = bytes.len();
        let start = self.cursor.offset;
        let name_start = start + 1;
        let name_end = scan_name(bytes, name_start);
        let name = &source[name_start..name_end];

        // Attribute positions are computed from a cursor that only moves
        // forward inside this tag.
        let mut attr_cursor = self.cursor.advance(&source[start..name_end]);
        let mut attributes = Vec::new();
        let mut self_closing = false;
        let mut i = name_end;

        let end = loop {
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len {
                break len;
            }
            match bytes[i] {
                b'>' => break i + 1,
                b'/' if bytes.get(i + 1) == Some(&b'>') => {
                    self_closing = true;
                    break i + 2;
                }
                b'/' | b'=' => {
                    i += 1;
                    continue;
                }
                // A new tag begins before this one was closed.
                b'<' if starts_markup(bytes, i) => break i,
                b'<' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = i;
            let attr_name_end = scan_attr_name(bytes, i);
            let attr_name = &source[attr_start..attr_name_end];
            i = attr_name_end;

            let mut value = "";
            let mut quote = QuoteStyle::None;
            let mut attr_end = attr_name_end;

            let mut j = i;
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < len && bytes[j] == b'=' {
                j += 1;
                while j < len && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                match bytes.get(j) {
                    Some(&q @ (b'"' | b'\'')) => {
                        quote = if q == b'"' {
                            QuoteStyle::Double
                        } else {
                            QuoteStyle::Single
                        };
                        let value_start = j + 1;
                        let value_end = bytes[value_start..]
                            .iter()
                            .position(|&b| b == q)
                            .map_or(len, |idx| value_start + idx);
                        value = &source[value_start..value_end];
                        attr_end = (value_end + 1).min(len);
                    }
                    _ => {
                        let value_end = scan_unquoted_value(bytes, j);
                        value = &source[j..value_end];
                        attr_end = value_end;
                    }
                }
                i = attr_end;
            }

            attr_cursor = attr_cursor.advance(&source[attr_cursor.offset..attr_start]);
            attributes.push(Attribute {
                name: attr_name,
                value,
                quote,
                position: attr_cursor,
                raw: &source[attr_start..attr_end],
            });
        };

        if !self_closing {
            self.raw_text_until = RAW_TEXT_ELEMENTS
                .iter()
                .copied()
                .find(|element| name.eq_ignore_ascii_case(element));
        }

        self.emit(
            end,
            TokenData::StartTag(StartTag {
                name,
                attributes,
                self_closing,
            }),
        )
    }

    fn scan_text(&mut self) -> Token<'a> {
        let source = self.source;
        let bytes = self.bytes();
        let start = self.cursor.offset;
        let mut end = start + 1;
        while end < bytes.len() && !starts_markup(bytes, end) {
            end += 1;
        }
        while !source.is_char_boundary(end) {
            end += 1;
        }
        self.emit(end, TokenData::Text)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let offset = self.cursor.offset;
        if offset >= self.source.len() {
            return None;
        }

        if let Some(element) = self.raw_text_until.take() {
            if let Some(token) = self.scan_raw_text(element) {
                return Some(token);
            }
        }

        let rest = &self.source[offset..];
        let bytes = self.bytes();
        let token = if rest.starts_with("<!--") {
            self.scan_comment()
        } else if rest.starts_with("<![CDATA[") {
            self.scan_cdata()
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            self.scan_declaration()
        } else if rest.starts_with("</") && bytes.get(offset + 2).is_some_and(u8::is_ascii_alphabetic)
        {
            self.scan_end_tag()
        } else if rest.starts_with('<') && bytes.get(offset + 1).is_some_and(u8::is_ascii_alphabetic)
        {
            self.scan_start_tag()
        } else {
            self.scan_text()
        };
        Some(token)
    }
}

/// Returns true if a markup construct starts at `i`.
fn starts_markup(bytes: &[u8], i: usize) -> bool {
    if bytes.get(i) != Some(&b'<') {
        return false;
    }
    match bytes.get(i + 1) {
        Some(b'!' | b'?') => true,
        Some(b'/') => bytes.get(i + 2).is_some_and(u8::is_ascii_alphabetic),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

fn scan_name(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && !matches!(bytes[i], b'>' | b'/' | b'<') && !bytes[i].is_ascii_whitespace()
    {
        i += 1;
    }
    i
}

fn scan_attr_name(bytes: &[u8], mut i: usize) -> usize {
    let start = i;
    while i < bytes.len()
        && !matches!(bytes[i], b'>' | b'/' | b'<' | b'=')
        && !bytes[i].is_ascii_whitespace()
    {
        i += 1;
    }
    // Always consume something so the attribute loop advances.
    if i == start {
        i + 1
    } else {
        i
    }
}

fn scan_unquoted_value(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && !matches!(bytes[i], b'>' | b'"' | b'\'') && !bytes[i].is_ascii_whitespace()
    {
        i += 1;
    }
    i
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Finds `</element` (ASCII case-insensitive) at or after `from`.
fn find_close_tag(source: &str, from: usize, element: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = from;
    while let Some(idx) = source[i..].find("</") {
        let at = i + idx;
        let name_start = at + 2;
        if starts_with_ignore_case(&source[name_start..], element) {
            let after = bytes.get(name_start + element.len());
            if after.map_or(true, |b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/')) {
                return Some(at);
            }
        }
        i = at + 2;
    }
    None
}

/// Line-oriented lookups over a source string.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the line starts of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines. An empty source has one empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-indexed line, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::LineOutOfBounds`] if the line does not exist.
    pub fn line(&self, line: usize) -> Result<&'a str, ScanError> {
        let out_of_bounds = ScanError::LineOutOfBounds {
            line,
            lines: self.line_count(),
        };
        let start = *line
            .checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx))
            .ok_or(out_of_bounds)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.source.len(), |next| next - 1);
        let text = &self.source[start..end];
        Ok(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Line and column of a byte offset.
    ///
    /// An offset equal to the source length is valid (end of document).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::OffsetOutOfBounds`] past the end of the source.
    pub fn position_at(&self, offset: usize) -> Result<Position, ScanError> {
        if offset > self.source.len() {
            return Err(ScanError::OffsetOutOfBounds {
                offset,
                len: self.source.len(),
            });
        }
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[idx];
        let mut boundary = offset;
        while !self.source.is_char_boundary(boundary) {
            boundary -= 1;
        }
        let col = self.source[line_start..boundary].chars().count() + 1;
        Ok(Position::new(offset, idx + 1, col))
    }
}
