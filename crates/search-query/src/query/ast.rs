//! AST types for parsed search queries

use serde::{Deserialize, Serialize};
use std::fmt;

use super::token::{Field, Op};

/// A fully parsed search query
///
/// Both lists keep the order in which their items appeared in the input.
/// Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Free-text terms
    pub keywords: Vec<String>,
    /// Structured `field operator value` filters
    pub expressions: Vec<Expression>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.expressions.is_empty()
    }

    /// Expressions on one of the recognized fields, in input order
    pub fn expressions_for(&self, field: Field) -> impl Iterator<Item = &Expression> {
        self.expressions
            .iter()
            .filter(move |expr| expr.field.as_known() == Some(field))
    }
}

/// Renders canonical query text: keywords first, then expressions.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for keyword in &self.keywords {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", keyword)?;
            first = false;
        }
        for expr in &self.expressions {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", expr)?;
            first = false;
        }
        Ok(())
    }
}

/// The left-hand side of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    /// One of the recognized fields
    Known(Field),
    /// Any other identifier, as written
    Other(String),
}

impl FieldRef {
    pub fn as_known(&self) -> Option<Field> {
        match self {
            FieldRef::Known(field) => Some(*field),
            FieldRef::Other(_) => None,
        }
    }
}

impl From<Field> for FieldRef {
    fn from(field: Field) -> Self {
        FieldRef::Known(field)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Known(field) => write!(f, "{}", field),
            FieldRef::Other(name) => write!(f, "{}", name),
        }
    }
}

/// One `field operator value` filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    pub field: FieldRef,
    pub operator: Op,
    pub value: String,
}

impl Expression {
    pub fn new(field: impl Into<FieldRef>, operator: Op, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)
    }
}
