//! Field and operator lookup for the search query scanner
//!
//! Uses compile-time perfect hashing (phf) for O(1) lookup. Both tables are
//! keyed by the uppercased lexeme.

use phf::phf_map;

use super::token::{Field, Op};

/// Static map of field names
static FIELDS: phf::Map<&'static str, Field> = phf_map! {
    "IN" => Field::In,
    "FORMAT" => Field::Format,
    "STATUS" => Field::Status,
    "CREATED" => Field::Created,
};

/// Static map of operator spellings to their canonical operator
static OPERATORS: phf::Map<&'static str, Op> = phf_map! {
    "=" => Op::Eq,
    "<" => Op::Lt,
    "<=" => Op::Le,
    "=<" => Op::Le,
    ">" => Op::Gt,
    ">=" => Op::Ge,
    "=>" => Op::Ge,
    ":" => Op::Colon,
};

/// Look up a field name, ignoring case
#[inline]
pub fn lookup_field(word: &str) -> Option<Field> {
    let upper = word.to_ascii_uppercase();
    FIELDS.get(upper.as_str()).copied()
}

/// Resolve a whole operator run to its canonical operator
///
/// The run is matched as a unit. No shorter prefix is tried when the full run
/// is unknown.
#[inline]
pub fn lookup_operator(run: &str) -> Option<Op> {
    let upper = run.to_ascii_uppercase();
    OPERATORS.get(upper.as_str()).copied()
}

/// Every accepted operator spelling
pub fn operator_spellings() -> impl Iterator<Item = &'static str> {
    OPERATORS.keys().copied()
}
