//! Search query scanner and assembler
//!
//! This module turns query text into tokens and tokens into a [`Query`].

mod assembler;
mod ast;
mod keywords;
mod scanner;
mod token;

pub use assembler::Assembler;
pub use ast::{Expression, FieldRef, Query};
pub use keywords::{lookup_field, lookup_operator, operator_spellings};
pub use scanner::Scanner;
pub use token::{Field, Op, Token, TokenKind};
