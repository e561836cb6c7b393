//! Search Query Parser
//!
//! Parses search filter strings such as `cat format:junit created<=2009` into
//! free-text keywords plus structured `field operator value` expressions.
//!
//! # Grammar
//!
//! ```text
//! query      ::= (keyword | expression)*
//! keyword    ::= IDENT
//! expression ::= (IDENT | FIELD) operator value
//! operator   ::= "=" | "<" | "<=" | "=<" | ">" | ">=" | "=>" | ":"
//! value      ::= IDENT
//! FIELD      ::= "in" | "format" | "status" | "created"   (any case)
//! ```
//!
//! # Example
//!
//! ```rust
//! use search_query::{parse, Expression, Field, Op};
//!
//! let query = parse("cat format:junit created=<2009").unwrap();
//! assert_eq!(query.keywords, vec!["cat"]);
//! assert_eq!(
//!     query.expressions,
//!     vec![
//!         Expression::new(Field::Format, Op::Colon, "junit"),
//!         Expression::new(Field::Created, Op::Le, "2009"),
//!     ]
//! );
//! ```

use std::io::{self, BufReader, Read};

pub mod config;
pub mod error;
pub mod query;

// Re-export main types
pub use config::ParserConfig;
pub use error::{Error, ParseError, Result};
pub use query::{Assembler, Expression, Field, FieldRef, Op, Query, Scanner, Token, TokenKind};

/// Parse a query with the default configuration
pub fn parse(input: &str) -> std::result::Result<Query, ParseError> {
    parse_with(input, &ParserConfig::default())
}

/// Parse a query
pub fn parse_with(input: &str, config: &ParserConfig) -> std::result::Result<Query, ParseError> {
    if let Some(limit) = config.max_query_len {
        let length = input.chars().count();
        if length > limit {
            return Err(ParseError::QueryTooLong { length, limit });
        }
    }

    Assembler::new(Scanner::with_config(input, config)).assemble()
}

/// Read a whole query from `reader` and parse it
///
/// Input that is not valid UTF-8 is reported as [`Error::Io`]. With a length
/// limit set, at most `4 * limit + 1` bytes are read; reaching that cap means
/// the query has more than `limit` runes, and the reported length counts only
/// the runes that were read.
pub fn parse_reader<R: Read>(reader: R, config: &ParserConfig) -> Result<Query> {
    let mut reader = BufReader::new(reader);

    let text = match config.max_query_len {
        Some(limit) => {
            // A rune is at most four bytes in UTF-8
            let cap = limit.saturating_mul(4).saturating_add(1);
            let mut bytes = Vec::new();
            reader.take(cap as u64).read_to_end(&mut bytes)?;

            if bytes.len() >= cap {
                let length = String::from_utf8_lossy(&bytes).chars().count();
                return Err(ParseError::QueryTooLong { length, limit }.into());
            }

            String::from_utf8(bytes)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?
        }
        None => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            text
        }
    };

    Ok(parse_with(&text, config)?)
}
