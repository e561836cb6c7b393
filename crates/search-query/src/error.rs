//! Error types for query parsing.

use thiserror::Error;

/// Errors raised while assembling a query from tokens.
///
/// Positions are zero-based rune offsets into the query text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A rune that belongs to no character class
    #[error("illegal character '{rune}' at position {position}")]
    IllegalCharacter { rune: char, position: usize },

    /// An operator run that is not one of the accepted spellings
    #[error("unrecognized operator '{lexeme}' at position {position}")]
    UnrecognizedOperator { lexeme: String, position: usize },

    /// An operator with no field before it or no value after it
    #[error("dangling operator at position {position}")]
    DanglingOperator { position: usize },

    /// Input exceeds the configured length limit
    #[error("query is {length} characters long, limit is {limit}")]
    QueryTooLong { length: usize, limit: usize },
}

impl ParseError {
    /// Position of the offending input, if the error has one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::IllegalCharacter { position, .. }
            | ParseError::UnrecognizedOperator { position, .. }
            | ParseError::DanglingOperator { position } => Some(*position),
            ParseError::QueryTooLong { .. } => None,
        }
    }
}

/// Error type for parsing from a reader.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error, including invalid UTF-8
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The text was read but is not a valid query
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
