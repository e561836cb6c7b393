//! Token types for the search query scanner

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token produced by the scanner
///
/// Tokens carry no position. Consumers that need one count the runes of the
/// lexemes they have consumed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The exact source text that was matched
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// The end-of-input token, which always has an empty lexeme
    pub fn eof() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }

    /// Length of the lexeme in runes
    pub fn rune_len(&self) -> usize {
        self.lexeme.chars().count()
    }

    /// Whether a query assembler has to look at this token
    pub fn is_significant(&self) -> bool {
        self.kind != TokenKind::Whitespace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "<eof>"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

/// The kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One of the recognized field names
    Keyword(Field),
    /// A comparison operator or the `:` shorthand
    Operator(Op),
    /// Any other word
    Ident,
    /// A run of spaces, tabs and newlines
    Whitespace,
    /// A rune (or operator run) that forms no valid token
    Illegal,
    /// End of input
    EndOfInput,
}

impl TokenKind {
    /// Check if this token can stand on the left of an operator
    pub fn is_field_like(&self) -> bool {
        matches!(self, TokenKind::Keyword(_) | TokenKind::Ident)
    }

    /// Check if this token can be the value of an expression
    pub fn is_value(&self) -> bool {
        self.is_field_like()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(field) => write!(f, "<field {}>", field),
            TokenKind::Operator(op) => write!(f, "<operator {}>", op),
            TokenKind::Ident => write!(f, "<identifier>"),
            TokenKind::Whitespace => write!(f, "<whitespace>"),
            TokenKind::Illegal => write!(f, "<illegal>"),
            TokenKind::EndOfInput => write!(f, "<eof>"),
        }
    }
}

/// A field name recognized by the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    In,
    Format,
    Status,
    Created,
}

impl Field {
    /// All fields, in declaration order
    pub const ALL: [Field; 4] = [Field::In, Field::Format, Field::Status, Field::Created];

    /// The canonical (uppercase) name
    pub fn name(&self) -> &'static str {
        match self {
            Field::In => "IN",
            Field::Format => "FORMAT",
            Field::Status => "STATUS",
            Field::Created => "CREATED",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::In => write!(f, "in"),
            Field::Format => write!(f, "format"),
            Field::Status => write!(f, "status"),
            Field::Created => write!(f, "created"),
        }
    }
}

/// A canonical operator
///
/// `<=` and `=<` both map to [`Op::Le`], `>=` and `=>` both map to [`Op::Ge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Colon,
}

impl Op {
    /// The canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Colon => ":",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whitespace class: space, tab and newline only
pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n'
}

/// Operator class
pub fn is_operator_char(c: char) -> bool {
    matches!(c, '>' | '<' | '=' | ':')
}

/// ASCII letters start a field name or identifier
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
