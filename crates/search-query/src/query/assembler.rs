//! State-machine assembler for search queries
//!
//! Groups the scanner's tokens into a [`Query`].
//!
//! # Grammar
//!
//! ```text
//! query      ::= (keyword | expression)*
//! keyword    ::= IDENT | FIELD
//! expression ::= (IDENT | FIELD) operator value
//! value      ::= IDENT | FIELD
//! ```
//!
//! Whitespace tokens are skipped but still counted, so error positions are
//! rune offsets into the original text.

use tracing::{debug, trace};

use super::ast::{Expression, FieldRef, Query};
use super::token::{is_operator_char, Op, Token, TokenKind};
use crate::error::ParseError;

/// A significant token and the rune offset where it starts
#[derive(Debug, Clone)]
struct Positioned {
    token: Token,
    position: usize,
}

/// Assembler state machine states
#[derive(Debug, Clone)]
enum AssemblerState {
    /// Expecting a keyword, a field, or the end
    Start,
    /// Holding a field-like token; an operator makes it an expression
    Term(Positioned),
    /// Holding a field and an operator (with its position); expecting the value
    Value(Positioned, Op, usize),
    /// Assembly complete
    Done,
}

/// Builds a [`Query`] from a token sequence
///
/// Fails on the first malformed token. No partial query is returned.
pub struct Assembler<I: Iterator<Item = Token>> {
    /// The token source, whitespace included
    tokens: I,
    /// One significant token of lookahead
    lookahead: Option<Positioned>,
    /// Runes consumed from `tokens` so far
    consumed: usize,
    state: AssemblerState,
    /// The query being built
    query: Query,
}

impl<I: Iterator<Item = Token>> Assembler<I> {
    /// Create an assembler over any token source
    pub fn new(tokens: impl IntoIterator<Item = Token, IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            lookahead: None,
            consumed: 0,
            state: AssemblerState::Start,
            query: Query::new(),
        }
    }

    /// Run the assembler to the end of input
    pub fn assemble(mut self) -> Result<Query, ParseError> {
        while !matches!(self.state, AssemblerState::Done) {
            if let Err(err) = self.step() {
                debug!("Query rejected: {}", err);
                return Err(err);
            }
        }

        debug!(
            "Query assembled: {} keywords, {} expressions",
            self.query.keywords.len(),
            self.query.expressions.len()
        );
        Ok(self.query)
    }

    /// Pull the next significant token from the source
    ///
    /// A source that ends without an `EndOfInput` token is treated as if it
    /// had one.
    fn pull(&mut self) -> Positioned {
        loop {
            let token = self.tokens.next().unwrap_or_else(Token::eof);
            let position = self.consumed;
            self.consumed += token.rune_len();

            if token.is_significant() {
                trace!("Token {} {:?} at {}", token.kind, token.lexeme, position);
                return Positioned { token, position };
            }
        }
    }

    /// Kind of the next significant token, without consuming it
    fn peek_kind(&mut self) -> TokenKind {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.pull());
        }
        self.lookahead
            .as_ref()
            .map_or(TokenKind::EndOfInput, |next| next.token.kind)
    }

    fn next(&mut self) -> Positioned {
        match self.lookahead.take() {
            Some(next) => next,
            None => self.pull(),
        }
    }

    /// Perform one step of the state machine
    fn step(&mut self) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.state, AssemblerState::Done) {
            AssemblerState::Start => self.assemble_start(),
            AssemblerState::Term(term) => self.assemble_term(term),
            AssemblerState::Value(term, op, op_position) => {
                self.assemble_value(term, op, op_position)
            }
            AssemblerState::Done => Ok(()),
        }
    }

    fn assemble_start(&mut self) -> Result<(), ParseError> {
        let next = self.next();

        match next.token.kind {
            TokenKind::EndOfInput => {
                self.state = AssemblerState::Done;
            }
            kind if kind.is_field_like() => {
                self.state = AssemblerState::Term(next);
            }
            TokenKind::Operator(_) => {
                return Err(ParseError::DanglingOperator {
                    position: next.position,
                });
            }
            TokenKind::Illegal => return Err(illegal(next)),
            // Filtered out by pull()
            _ => self.state = AssemblerState::Start,
        }

        Ok(())
    }

    fn assemble_term(&mut self, term: Positioned) -> Result<(), ParseError> {
        match self.peek_kind() {
            TokenKind::Operator(op) => {
                let operator = self.next();
                self.state = AssemblerState::Value(term, op, operator.position);
            }
            _ => {
                // Not followed by an operator: free text
                self.query.keywords.push(term.token.lexeme);
                self.state = AssemblerState::Start;
            }
        }

        Ok(())
    }

    fn assemble_value(
        &mut self,
        term: Positioned,
        op: Op,
        op_position: usize,
    ) -> Result<(), ParseError> {
        let value = self.next();

        match value.token.kind {
            kind if kind.is_value() => {
                self.query.expressions.push(Expression::new(
                    field_ref(term.token),
                    op,
                    value.token.lexeme,
                ));
                self.state = AssemblerState::Start;
                Ok(())
            }
            TokenKind::Illegal => Err(illegal(value)),
            _ => Err(ParseError::DanglingOperator {
                position: op_position,
            }),
        }
    }
}

/// The left-hand side of an expression from a field-like token
fn field_ref(token: Token) -> FieldRef {
    match token.kind {
        TokenKind::Keyword(field) => FieldRef::Known(field),
        _ => FieldRef::Other(token.lexeme),
    }
}

/// Turn an `Illegal` token into the matching error
fn illegal(positioned: Positioned) -> ParseError {
    let Positioned { token, position } = positioned;
    let mut chars = token.lexeme.chars();

    match (chars.next(), chars.next()) {
        (Some(rune), None) if !is_operator_char(rune) => {
            ParseError::IllegalCharacter { rune, position }
        }
        _ => ParseError::UnrecognizedOperator {
            lexeme: token.lexeme,
            position,
        },
    }
}
