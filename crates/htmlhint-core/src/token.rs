//! Positioned lexical tokens produced by the scanner.

use serde::{Deserialize, Serialize};

/// A location in the source text.
///
/// Ordering compares the byte offset first, which agrees with
/// `(line, col)` ordering for positions taken from the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub col: usize,
}

impl Position {
    /// The position of the first character of a document.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        col: 1,
    };

    /// Creates a position with explicit values.
    #[must_use]
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        Self { offset, line, col }
    }

    /// Returns the position reached after consuming `text` from `self`.
    ///
    /// A `\n` starts a new line; a `\r` immediately before it is treated
    /// as part of the same line break.
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for ch in text.chars() {
            next.offset += ch.len_utf8();
            if ch == '\n' {
                next.line += 1;
                next.col = 1;
            } else {
                next.col += 1;
            }
        }
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// How an attribute value was quoted in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `name="value"`
    Double,
    /// `name='value'`
    Single,
    /// `name=value` or a bare `name`.
    None,
}

impl QuoteStyle {
    /// The quote character, if any.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Double => Some('"'),
            Self::Single => Some('\''),
            Self::None => None,
        }
    }
}

/// A single attribute on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name, case preserved.
    pub name: &'a str,
    /// Attribute value without its quotes. Empty for bare attributes.
    pub value: &'a str,
    /// Quoting used for the value.
    pub quote: QuoteStyle,
    /// Position of the first character of the name.
    pub position: Position,
    /// Verbatim source text of the whole attribute.
    pub raw: &'a str,
}

/// Payload of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    /// Tag name, case preserved.
    pub name: &'a str,
    /// Attributes in source order. Duplicates are kept.
    pub attributes: Vec<Attribute<'a>>,
    /// Whether the tag was written as `<name ... />`.
    pub self_closing: bool,
}

impl<'a> StartTag<'a> {
    /// Returns the first attribute whose name matches, ignoring ASCII case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if the tag carries an attribute with this name.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns true if the tag name matches, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// The variant-specific part of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenData<'a> {
    /// `<name attr=value>`
    StartTag(StartTag<'a>),
    /// `</name>`
    EndTag {
        /// Tag name, case preserved.
        name: &'a str,
    },
    /// Character data between tags.
    Text,
    /// `<!-- content -->`, or a bogus comment such as `<?xml ...?>`.
    Comment {
        /// Text between the delimiters.
        content: &'a str,
    },
    /// `<!DOCTYPE ...>`
    Doctype,
}

/// Discriminant of [`TokenData`], used by rules to declare what they inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Start tag.
    StartTag,
    /// End tag.
    EndTag,
    /// Text.
    Text,
    /// Comment.
    Comment,
    /// Doctype declaration.
    Doctype,
}

/// A positioned lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Position of the first character.
    pub position: Position,
    /// Position just past the last character.
    pub end: Position,
    /// Verbatim source slice.
    pub raw: &'a str,
    /// Variant payload.
    pub data: TokenData<'a>,
}

impl<'a> Token<'a> {
    /// Returns the token's kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self.data {
            TokenData::StartTag(_) => TokenKind::StartTag,
            TokenData::EndTag { .. } => TokenKind::EndTag,
            TokenData::Text => TokenKind::Text,
            TokenData::Comment { .. } => TokenKind::Comment,
            TokenData::Doctype => TokenKind::Doctype,
        }
    }

    /// 1-indexed line of the first character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 1-indexed column of the first character.
    #[must_use]
    pub fn col(&self) -> usize {
        self.position.col
    }

    /// Start tag payload, if this is a start tag.
    #[must_use]
    pub fn as_start_tag(&self) -> Option<&StartTag<'a>> {
        match &self.data {
            TokenData::StartTag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&'a str> {
        match &self.data {
            TokenData::StartTag(tag) => Some(tag.name),
            TokenData::EndTag { name } => Some(*name),
            _ => None,
        }
    }

    /// Comment content, if this is a comment.
    #[must_use]
    pub fn comment(&self) -> Option<&'a str> {
        match self.data {
            TokenData::Comment { content } => Some(content),
            _ => None,
        }
    }

    /// Position of the byte at `index` within [`Token::raw`].
    ///
    /// `index` is clamped to the raw length and must fall on a char boundary
    /// to be exact; otherwise the preceding boundary is used.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Position {
        let mut index = index.min(self.raw.len());
        while !self.raw.is_char_boundary(index) {
            index -= 1;
        }
        self.position.advance(&self.raw[..index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_lines_and_columns() {
        let pos = Position::START.advance("ab\ncd");
        assert_eq!(pos, Position::new(5, 2, 3));
    }

    #[test]
    fn advance_treats_crlf_as_one_break() {
        let pos = Position::START.advance("x\r\ny");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.col, 2);
    }

    #[test]
    fn advance_counts_characters_not_bytes() {
        let pos = Position::START.advance("中文");
        assert_eq!(pos.col, 3);
        assert_eq!(pos.offset, 6);
    }

    #[test]
    fn ordering_follows_offset() {
        let a = Position::new(3, 1, 4);
        let b = Position::new(7, 2, 1);
        assert!(a < b);
    }

    #[test]
    fn token_position_at_inner_offset() {
        let token = Token {
            position: Position::new(10, 3, 5),
            end: Position::new(15, 4, 3),
            raw: "ab\ncd",
            data: TokenData::Text,
        };
        assert_eq!(token.position_at(4), Position::new(14, 4, 2));
        assert_eq!(token.position_at(100), token.end);
    }
}
