//! End-to-end tests for query parsing

use pretty_assertions::assert_eq;
use rstest::rstest;
use search_query::{
    parse, parse_reader, parse_with, Error, Expression, Field, FieldRef, Op, ParseError,
    ParserConfig, Query, Scanner, TokenKind,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a subscriber once so `RUST_LOG=search_query=trace` shows assembler events
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_test_writer())
        .try_init();
}

#[test]
fn test_full_example_query() {
    init_tracing();

    let query = parse("cat format:junit status:pass created<=2009 created>=2008").unwrap();

    assert_eq!(query.keywords, vec!["cat".to_string()]);
    assert_eq!(
        query.expressions,
        vec![
            Expression::new(Field::Format, Op::Colon, "junit"),
            Expression::new(Field::Status, Op::Colon, "pass"),
            Expression::new(Field::Created, Op::Le, "2009"),
            Expression::new(Field::Created, Op::Ge, "2008"),
        ]
    );
}

#[test]
fn test_mixed_order_and_duplicates() {
    init_tracing();

    let query = parse("status:pass cat status:pass dog cat").unwrap();
    assert_eq!(
        query.keywords,
        vec!["cat".to_string(), "dog".to_string(), "cat".to_string()]
    );
    assert_eq!(query.expressions.len(), 2);
    assert_eq!(query.expressions[0], query.expressions[1]);
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\t")]
#[case("\n \t \n")]
fn test_whitespace_only_is_empty(#[case] input: &str) {
    assert_eq!(parse(input).unwrap(), Query::new());
}

#[test]
fn test_empty_input_scans_to_eof() {
    let tokens: Vec<_> = Scanner::new("").collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
    assert_eq!(tokens[0].lexeme, "");
}

#[rstest]
#[case("status:pass")]
#[case("STATUS:pass")]
#[case("StAtUs:pass")]
fn test_field_case_insensitive(#[case] input: &str) {
    let query = parse(input).unwrap();
    assert_eq!(
        query.expressions,
        vec![Expression::new(Field::Status, Op::Colon, "pass")]
    );
}

#[rstest]
#[case("created<=2009", Op::Le)]
#[case("created=<2009", Op::Le)]
#[case("created>=2009", Op::Ge)]
#[case("created=>2009", Op::Ge)]
#[case("created<2009", Op::Lt)]
#[case("created>2009", Op::Gt)]
#[case("created=2009", Op::Eq)]
#[case("created:2009", Op::Colon)]
fn test_operator_canonicalization(#[case] input: &str, #[case] op: Op) {
    let query = parse(input).unwrap();
    assert_eq!(
        query.expressions,
        vec![Expression::new(Field::Created, op, "2009")]
    );
}

#[rstest]
#[case("<=")]
#[case("=<")]
#[case(">=")]
#[case("=>")]
#[case("<")]
#[case(">")]
#[case("=")]
#[case(":")]
fn test_operator_independent_of_whitespace(#[case] spelling: &str) {
    let tight = parse(&format!("created{spelling}2009")).unwrap();
    let loose = parse(&format!("created \t{spelling}\n  2009")).unwrap();
    assert_eq!(tight, loose);
}

#[test]
fn test_illegal_character() {
    let err = parse("status#pass").unwrap_err();
    assert_eq!(
        err,
        ParseError::IllegalCharacter {
            rune: '#',
            position: 6
        }
    );
}

#[rstest]
#[case("status-pass", '-')]
#[case("status.pass", '.')]
fn test_letter_words_reject_dash_and_dot(#[case] input: &str, #[case] rune: char) {
    let err = parse(input).unwrap_err();
    assert_eq!(err, ParseError::IllegalCharacter { rune, position: 6 });
}

#[test]
fn test_unrecognized_operator_not_downgraded() {
    let err = parse("status::pass").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnrecognizedOperator {
            lexeme: "::".to_string(),
            position: 6
        }
    );
}

#[test]
fn test_dangling_operator_at_end() {
    let err = parse("cat created<=").unwrap_err();
    assert_eq!(err, ParseError::DanglingOperator { position: 11 });
}

#[test]
fn test_reparse_is_idempotent() {
    let input = "cat format:junit status:pass created<=2009 created>=2008";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

#[test]
fn test_display_round_trip() {
    let query = parse("Owner=Me cat format:junit created=>2008 dog in:status").unwrap();
    let rendered = query.to_string();
    assert_eq!(rendered, "cat dog Owner=Me format:junit created>=2008 in:status");
    assert_eq!(parse(&rendered).unwrap(), query);
}

#[test]
fn test_date_values() {
    let query = parse("created:2006-08-10").unwrap();
    assert_eq!(
        query.expressions,
        vec![Expression::new(Field::Created, Op::Colon, "2006-08-10")]
    );
}

#[test]
fn test_strict_config_rejects_dashes() {
    let err = parse_with("created:2006-08-10", &ParserConfig::strict()).unwrap_err();
    assert_eq!(
        err,
        ParseError::IllegalCharacter {
            rune: '-',
            position: 12
        }
    );
}

#[test]
fn test_query_length_limit() {
    let config = ParserConfig::from_json(r#"{"max_query_len": 8}"#).unwrap();
    assert!(parse_with("cat dog", &config).is_ok());

    let err = parse_with("cat format:junit", &config).unwrap_err();
    assert_eq!(
        err,
        ParseError::QueryTooLong {
            length: 16,
            limit: 8
        }
    );
}

#[test]
fn test_parse_reader() {
    let input = "cat\nstatus:pass\n";
    let query = parse_reader(input.as_bytes(), &ParserConfig::default()).unwrap();
    assert_eq!(query.keywords, vec!["cat".to_string()]);
    assert_eq!(
        query.expressions,
        vec![Expression::new(Field::Status, Op::Colon, "pass")]
    );
}

#[test]
fn test_parse_reader_stops_at_limit() {
    let config = ParserConfig::from_json(r#"{"max_query_len": 8}"#).unwrap();

    // An endless source is cut off after 4 * 8 + 1 bytes
    let err = parse_reader(std::io::repeat(b'a'), &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::QueryTooLong { length: 33, limit: 8 })
    ));

    let err = parse_reader("cat format:junit".as_bytes(), &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::QueryTooLong { length: 16, limit: 8 })
    ));

    let query = parse_reader("cat dog".as_bytes(), &config).unwrap();
    assert_eq!(query.keywords, vec!["cat".to_string(), "dog".to_string()]);
}

#[test]
fn test_parse_reader_errors() {
    let invalid_utf8: &[u8] = &[b'c', 0xff, b'a'];
    let err = parse_reader(invalid_utf8, &ParserConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let err = parse_reader("status#".as_bytes(), &ParserConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::IllegalCharacter { rune: '#', .. })
    ));
}

#[test]
fn test_query_json() {
    let query = parse("cat Owner=me status:pass").unwrap();
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "keywords": ["cat"],
            "expressions": [
                {"field": "Owner", "operator": "eq", "value": "me"},
                {"field": "status", "operator": "colon", "value": "pass"},
            ]
        })
    );

    let back: Query = serde_json::from_value(json).unwrap();
    assert_eq!(back, query);
    assert_eq!(
        back.expressions[0].field,
        FieldRef::Other("Owner".to_string())
    );
}

#[test]
fn test_parallel_parses_share_nothing() {
    let inputs = ["cat status:pass", "in:repo created>=2008", "format:junit dog"];
    let handles: Vec<_> = inputs
        .iter()
        .map(|input| {
            let input = input.to_string();
            std::thread::spawn(move || parse(&input))
        })
        .collect();

    for (handle, input) in handles.into_iter().zip(inputs) {
        let threaded = handle.join().unwrap().unwrap();
        assert_eq!(threaded, parse(input).unwrap());
    }
}
