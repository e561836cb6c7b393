//! Scanner for the search query language
//!
//! Turns a character stream into tokens, one maximal run at a time.
//!
//! # Features
//!
//! - Works over any `Iterator<Item = char>`, not just `&str`
//! - One rune of pushback, no backtracking
//! - Whitespace is emitted as a token so lexemes cover the whole input
//! - Case-insensitive field names, canonicalized operator spellings
//!
//! # Example
//!
//! ```rust
//! use search_query::query::{Scanner, TokenKind};
//!
//! let kinds: Vec<_> = Scanner::new("status:pass").map(|t| t.kind).collect();
//! assert_eq!(kinds.len(), 4); // status, :, pass, EOF
//! assert_eq!(kinds[3], TokenKind::EndOfInput);
//! ```

use std::iter::FusedIterator;
use std::str::Chars;

use super::keywords::{lookup_field, lookup_operator};
use super::token::{is_digit, is_letter, is_operator_char, is_whitespace, Token, TokenKind};
use crate::config::ParserConfig;

/// A scanner over a character source
///
/// Implements `Iterator` over `Token`s. The sequence always ends with exactly
/// one [`TokenKind::EndOfInput`]. Cloning a scanner before it is advanced
/// gives an independent copy of the sequence from the start.
#[derive(Debug, Clone)]
pub struct Scanner<I: Iterator<Item = char>> {
    /// The character source
    source: I,
    /// A rune read past the end of the previous run
    pushback: Option<char>,
    /// Accept `-` and `.` inside words that start with a digit
    date_values: bool,
    /// Whether we've emitted the EOF token
    eof_emitted: bool,
}

impl<'a> Scanner<Chars<'a>> {
    /// Create a scanner over a string with the default configuration
    pub fn new(input: &'a str) -> Self {
        Self::from_chars(input.chars())
    }

    /// Create a scanner over a string
    pub fn with_config(input: &'a str, config: &ParserConfig) -> Self {
        Self::from_chars_with_config(input.chars(), config)
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Create a scanner over any character source
    pub fn from_chars(source: I) -> Self {
        Self::from_chars_with_config(source, &ParserConfig::default())
    }

    pub fn from_chars_with_config(source: I, config: &ParserConfig) -> Self {
        Self {
            source,
            pushback: None,
            date_values: config.date_values,
            eof_emitted: false,
        }
    }

    /// Read the next rune, taking the pushback slot first
    fn read(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.source.next())
    }

    /// Return a rune to the stream; it starts the next token
    fn unread(&mut self, c: char) {
        debug_assert!(self.pushback.is_none(), "pushback slot already full");
        self.pushback = Some(c);
    }

    /// Collect `first` and every following rune accepted by `accept`
    fn scan_while(&mut self, first: char, accept: impl Fn(char) -> bool) -> String {
        let mut buf = String::new();
        buf.push(first);

        while let Some(c) = self.read() {
            if accept(c) {
                buf.push(c);
            } else {
                self.unread(c);
                break;
            }
        }

        buf
    }

    fn scan_whitespace(&mut self, first: char) -> Token {
        let text = self.scan_while(first, is_whitespace);
        Token::new(TokenKind::Whitespace, text)
    }

    /// Scan a full operator run and resolve it as a whole
    fn scan_operator(&mut self, first: char) -> Token {
        let text = self.scan_while(first, is_operator_char);

        match lookup_operator(&text) {
            Some(op) => Token::new(TokenKind::Operator(op), text),
            None => Token::new(TokenKind::Illegal, text),
        }
    }

    /// Scan a field name, identifier, or numeric/date-like value
    fn scan_word(&mut self, first: char) -> Token {
        // Only values that start with a digit may carry `-` and `.`
        let date_like = self.date_values && is_digit(first);
        let text = self.scan_while(first, |c| {
            is_letter(c) || is_digit(c) || c == '_' || (date_like && (c == '-' || c == '.'))
        });

        // Only words that start with a letter can be field names
        let kind = if is_letter(first) {
            lookup_field(&text).map_or(TokenKind::Ident, TokenKind::Keyword)
        } else {
            TokenKind::Ident
        };

        Token::new(kind, text)
    }

    /// Get the next token
    pub fn scan(&mut self) -> Token {
        let Some(c) = self.read() else {
            return Token::eof();
        };

        if is_whitespace(c) {
            self.scan_whitespace(c)
        } else if is_operator_char(c) {
            self.scan_operator(c)
        } else if is_letter(c) || is_digit(c) {
            self.scan_word(c)
        } else {
            Token::new(TokenKind::Illegal, c.to_string())
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_emitted {
            return None;
        }

        let token = self.scan();
        if token.kind == TokenKind::EndOfInput {
            self.eof_emitted = true;
        }
        Some(token)
    }
}

impl<I: Iterator<Item = char>> FusedIterator for Scanner<I> {}
