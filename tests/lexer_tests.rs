// tests/lexer_tests.rs

use pseudo_lang::ast::{DEFINED_TOKENS, DefinedToken, Token};
use pseudo_lang::lexer::{Lexer, lex};

fn tokens(input: &str) -> Vec<Token> {
    let tokenized = Lexer::new(input).tokenize();
    assert!(tokenized.successful(), "Failed to lex: {:?}", input);
    tokenized.tokens.into_iter().map(|(_, t)| t).collect()
}

fn single(input: &str) -> Token {
    let mut all = tokens(input);
    assert_eq!(all.len(), 1, "Expected one token for {:?}, got {:?}", input, all);
    all.remove(0)
}

// ============================================================================
// Fixed Tokens
// ============================================================================

#[test]
fn test_every_defined_token_lexes_alone() {
    for spec in DEFINED_TOKENS {
        assert_eq!(
            single(spec.literal),
            Token::Defined(spec.token),
            "Failed for literal: {:?}",
            spec.literal
        );
    }
}

#[test]
fn test_two_char_vs_single_char() {
    let test_cases = vec![
        ("<=", vec![DefinedToken::LtEq]),
        (">=", vec![DefinedToken::GtEq]),
        ("!=", vec![DefinedToken::NotEqual]),
        ("< =", vec![DefinedToken::Lt, DefinedToken::Equal]),
        ("<==", vec![DefinedToken::LtEq, DefinedToken::Equal]),
        ("><", vec![DefinedToken::Gt, DefinedToken::Lt]),
    ];

    for (input, expected) in test_cases {
        let expected: Vec<Token> = expected.into_iter().map(Token::Defined).collect();
        assert_eq!(tokens(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_bare_exclamation_is_invalid() {
    let tokenized = lex("A ! B");
    assert!(!tokenized.successful());
    assert_eq!(tokenized.first_invalid_offset, 2);
}

#[test]
fn test_word_operators() {
    assert_eq!(
        tokens("NOT A AND B OR C div D mod E"),
        vec![
            Token::Defined(DefinedToken::Not),
            Token::VariableName("A".into()),
            Token::Defined(DefinedToken::And),
            Token::VariableName("B".into()),
            Token::Defined(DefinedToken::Or),
            Token::VariableName("C".into()),
            Token::Defined(DefinedToken::Div),
            Token::VariableName("D".into()),
            Token::Defined(DefinedToken::Mod),
            Token::VariableName("E".into()),
        ]
    );
}

#[test]
fn test_keyword_prefix_is_an_identifier() {
    assert_eq!(single("ifx"), Token::MethodName("ifx".into()));
    assert_eq!(single("ending"), Token::MethodName("ending".into()));
    assert_eq!(single("divide"), Token::MethodName("divide".into()));
    assert_eq!(single("NOTE"), Token::VariableName("NOTE".into()));
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifier_classification() {
    let test_cases = vec![
        ("MY_VAR", Token::VariableName("MY_VAR".into())),
        ("X", Token::VariableName("X".into())),
        ("_TMP2", Token::VariableName("_TMP2".into())),
        ("_", Token::VariableName("_".into())),
        ("myMethod", Token::MethodName("myMethod".into())),
        ("x1", Token::MethodName("x1".into())),
        ("_helper", Token::MethodName("_helper".into())),
        ("MyClass", Token::ClassName("MyClass".into())),
        ("Stack2", Token::ClassName("Stack2".into())),
        // Case decides, not usage: this is still a variable.
        ("MY_METHOD", Token::VariableName("MY_METHOD".into())),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_booleans() {
    assert_eq!(tokens("true false"), vec![Token::Bool(true), Token::Bool(false)]);
    assert_eq!(single("TRUE"), Token::VariableName("TRUE".into()));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec![
        ("123", Token::Integer(123)),
        ("0", Token::Integer(0)),
        ("007", Token::Integer(7)),
        ("12.5", Token::Decimal(12.5)),
        ("0.25", Token::Decimal(0.25)),
        ("3.14159", Token::Decimal(3.14159)),
        ("0.1", Token::Decimal(0.1)),
        ("9223372036854775807", Token::Integer(i64::MAX)),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_trailing_point_is_decimal() {
    assert_eq!(single("12."), Token::Decimal(12.0));
}

#[test]
fn test_decimal_integer_part_beyond_i64() {
    // Largest f64 below 2^96
    let below_limit = f64::from_bits(2f64.powi(96).to_bits() - 1);
    let test_cases = vec![
        ("9223372036854775807.5", 9_223_372_036_854_775_808.0),
        ("99999999999999999999.25", 1e20),
        ("79228162514264337593543950335.0", below_limit),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input), Token::Decimal(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_large_decimals_relex_through_display() {
    for input in [
        "9223372036854775807.5",
        "18446744073709551615.75",
        "79228162514264337593543950335.0",
    ] {
        let token = single(input);
        let written = token.to_string();
        assert_eq!(single(&written), token, "Failed for input: {} -> {}", input, written);
    }
}

#[test]
fn test_decimal_beyond_range_is_unrecognized() {
    let tokenized = lex("X = 79228162514264337593543950336.5");
    assert!(!tokenized.successful());
    assert_eq!(tokenized.first_invalid_offset, 4);
}

#[test]
fn test_negative_number_is_minus_then_literal() {
    assert_eq!(
        tokens("-5"),
        vec![Token::Defined(DefinedToken::Minus), Token::Integer(5)]
    );
}

#[test]
fn test_number_then_identifier() {
    assert_eq!(
        tokens("3X"),
        vec![Token::Integer(3), Token::VariableName("X".into())]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_escapes() {
    let test_cases = vec![
        (r#""hello""#, "hello"),
        (r#""a\nb""#, "a\nb"),
        (r#""a\tb""#, "a\tb"),
        (r#""a\\b""#, "a\\b"),
        (r#""a\zb""#, "azb"),
        (r#""say \"hi\"""#, "say \"hi\""),
        (r#""""#, ""),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input), Token::Str(expected.into()), "Failed for input: {}", input);
    }
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let tokenized = lex("output \"abc");
    assert!(tokenized.successful());
    assert_eq!(tokenized.tokens[1], (7, Token::Str("abc".into())));
}

#[test]
fn test_string_keeps_raw_newlines() {
    assert_eq!(single("\"a\nb\""), Token::Str("a\nb".into()));
}

// ============================================================================
// Whitespace, Newlines and Comments
// ============================================================================

#[test]
fn test_newlines_are_tokens() {
    assert_eq!(
        tokens("A\n\tB"),
        vec![
            Token::VariableName("A".into()),
            Token::Defined(DefinedToken::Newline),
            Token::VariableName("B".into()),
        ]
    );
}

#[test]
fn test_comment_keeps_newline() {
    let with_comment = tokens("A = 1 // set A\nB = 2");
    let without_comment = tokens("A = 1\nB = 2");
    assert_eq!(with_comment, without_comment);
}

#[test]
fn test_comment_at_end_of_input() {
    assert_eq!(tokens("A // trailing"), vec![Token::VariableName("A".into())]);
}

#[test]
fn test_empty_input() {
    let tokenized = lex("");
    assert!(tokenized.successful());
    assert!(tokenized.tokens.is_empty());
}

#[test]
fn test_carriage_return_is_invalid() {
    let tokenized = lex("A\r\n");
    assert!(!tokenized.successful());
    assert_eq!(tokenized.first_invalid_offset, 1);
}

// ============================================================================
// Offsets and Failure
// ============================================================================

#[test]
fn test_offsets_cover_recognized_prefix() {
    let source = "loop I from 1 to 10 ? end";
    let tokenized = lex(source);
    assert!(!tokenized.successful());
    assert_eq!(tokenized.first_invalid_offset, 20);

    let chars: Vec<char> = source.chars().collect();
    for (offset, token) in &tokenized.tokens {
        let text = token.to_string();
        let slice: String = chars[*offset..*offset + text.chars().count()].iter().collect();
        assert_eq!(slice, text, "Token {:?} does not match its source span", token);
    }
}

#[test]
fn test_offsets_are_characters() {
    let tokenized = lex("\"é\" X");
    assert_eq!(tokenized.tokens[1].0, 4);
    assert_eq!(tokenized.length, 5);
}

#[test]
fn test_round_trip_through_display() {
    let source = "method total(LIST, N)\n  S = 0.5 // start\n  loop I from 0 to N - 1\n    S = S + LIST[I] * 2\n  end loop\n  output \"sum:\\t\", S, NOT false\nend method\n";
    let first = tokens(source);
    let rebuilt: Vec<String> = first.iter().map(|t| t.to_string()).collect();
    let second = tokens(&rebuilt.join(" "));
    assert_eq!(first, second);
}
