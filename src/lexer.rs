use std::{fmt, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    ast::{DEFINED_TOKENS, DefinedToken, Token},
    cursor::Cursor,
};

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Z][_0-9A-Z]*$").expect("valid variable pattern"));

static METHOD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-z][_0-9A-Za-z]*$").expect("valid method pattern"));

const COMMENT_MARKER: &str = "//";
const STRING_BOUNDARY: char = '"';

/// 1-based line and column of a character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locates a character offset in `text`. Offsets past the end map to the
    /// position just after the last character.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut position = Position { line: 1, column: 1 };
        for ch in text.chars().take(offset) {
            if ch == '\n' {
                position.line += 1;
                position.column = 1;
            } else {
                position.column += 1;
            }
        }
        position
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexing stopped before the end of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    /// Character offset where recognition failed
    pub offset: usize,
    pub position: Position,
    /// Character found there
    pub found: Option<char>,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(ch) => write!(f, "Unrecognized input {:?} at {}", ch, self.position),
            None => write!(f, "Unrecognized input at {}", self.position),
        }
    }
}

impl std::error::Error for LexError {}

/// Output of one lexer run.
///
/// Tokens past `first_invalid_offset` are never produced; the prefix that was
/// recognized is kept so callers can still report on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<(usize, Token)>,
    pub first_invalid_offset: usize,
    /// Input length in characters
    pub length: usize,
}

impl Tokenized {
    pub fn successful(&self) -> bool {
        self.first_invalid_offset == self.length
    }

    pub fn tokens(&self) -> &[(usize, Token)] {
        &self.tokens
    }

    /// Converts the flag pair into a typed result. `source` must be the text
    /// that was lexed.
    pub fn into_result(self, source: &str) -> Result<Vec<(usize, Token)>, LexError> {
        if self.successful() {
            return Ok(self.tokens);
        }
        Err(LexError {
            offset: self.first_invalid_offset,
            position: Position::locate(source, self.first_invalid_offset),
            found: source.chars().nth(self.first_invalid_offset),
        })
    }
}

pub fn lex(input: &str) -> Tokenized {
    Lexer::new(input).tokenize()
}

pub struct Lexer {
    cursor: Cursor,
    tokens: Vec<(usize, Token)>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            cursor: Cursor::new(input),
            tokens: Vec::new(),
        }
    }

    /// Runs until the input is exhausted or nothing matches.
    pub fn tokenize(mut self) -> Tokenized {
        while !self.cursor.at_end() {
            let start = self.cursor.position();
            let advanced = self.skip_blanks()
                || self.scan_identifier(start)
                || self.scan_number(start)
                || self.scan_defined(start)
                || self.scan_complex(start);
            if !advanced {
                break;
            }
        }

        let tokenized = Tokenized {
            tokens: self.tokens,
            first_invalid_offset: self.cursor.position(),
            length: self.cursor.len(),
        };
        if !tokenized.successful() {
            tracing::debug!(
                offset = tokenized.first_invalid_offset,
                recognized = tokenized.tokens.len(),
                "lexing stopped early"
            );
        }
        tokenized
    }

    fn emit(&mut self, start: usize, token: Token) -> bool {
        self.tokens.push((start, token));
        true
    }

    fn skip_blanks(&mut self) -> bool {
        let mut skipped = false;
        while self.cursor.peek_if(|ch| matches!(ch, Some(' ' | '\t'))) {
            skipped = true;
        }
        skipped
    }

    fn scan_identifier(&mut self, start: usize) -> bool {
        let Some(first) = self.cursor.take_if(|c| c.is_alphabetic() || c == '_') else {
            return false;
        };

        let mut word = String::from(first);
        while let Some(ch) = self.cursor.take_if(|c| c.is_alphanumeric() || c == '_') {
            word.push(ch);
        }

        let token = if let Some(defined) = DefinedToken::from_word(&word) {
            Token::Defined(defined)
        } else {
            match word.as_str() {
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                _ => classify(word),
            }
        };
        self.emit(start, token)
    }

    fn scan_number(&mut self, start: usize) -> bool {
        let whole = self.cursor.digit_sequence(10);
        if whole.is_empty() {
            return false;
        }

        let token = if self.cursor.peek_if(|ch| ch == Some('.')) {
            let fraction = self.cursor.digit_sequence(10);
            decimal_value(&whole, &fraction).map(Token::Decimal)
        } else {
            integer_value(&whole).map(Token::Integer)
        };

        match token {
            Some(token) => self.emit(start, token),
            None => {
                // Out of range: leave the literal unrecognized.
                self.rewind(start);
                false
            }
        }
    }

    fn scan_defined(&mut self, start: usize) -> bool {
        let matched = DEFINED_TOKENS
            .iter()
            .find(|spec| self.cursor.try_literal(spec.literal))
            .map(|spec| spec.token);
        match matched {
            Some(token) => self.emit(start, Token::Defined(token)),
            None => false,
        }
    }

    fn scan_complex(&mut self, start: usize) -> bool {
        if self.cursor.try_literal(COMMENT_MARKER) {
            // The newline stays in the input and is emitted on the next step.
            while self.cursor.peek_if(|ch| matches!(ch, Some(c) if c != '\n')) {}
            return true;
        }

        if self.cursor.peek_if(|ch| ch == Some(STRING_BOUNDARY)) {
            let content = self.read_string_body();
            return self.emit(start, Token::Str(content));
        }

        false
    }

    /// Reads up to and including the closing quote. An unterminated string
    /// runs to the end of the input.
    fn read_string_body(&mut self) -> String {
        let mut content = String::new();
        while let Some(ch) = self.cursor.take_if(|_| true) {
            match ch {
                STRING_BOUNDARY => break,
                '\\' => match self.cursor.take_if(|_| true) {
                    Some('n') => content.push('\n'),
                    Some('t') => content.push('\t'),
                    Some(other) => content.push(other),
                    None => break,
                },
                other => content.push(other),
            }
        }
        content
    }

    fn rewind(&mut self, offset: usize) {
        while self.cursor.position() > offset {
            self.cursor.step_back();
        }
    }
}

fn classify(word: String) -> Token {
    if VARIABLE_NAME.is_match(&word) {
        Token::VariableName(word)
    } else if METHOD_NAME.is_match(&word) {
        Token::MethodName(word)
    } else {
        Token::ClassName(word)
    }
}

fn integer_value(digits: &[u32]) -> Option<i64> {
    digits
        .iter()
        .try_fold(0i64, |acc, &d| acc.checked_mul(10)?.checked_add(i64::from(d)))
}

/// Exclusive upper bound of a 96-bit decimal mantissa (2^96).
const DECIMAL_LIMIT: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Sums the integer part and `d * 10^-(i+1)` for each fractional digit.
///
/// The sum is exact; digits a 96-bit decimal cannot hold are dropped, which
/// is already below `f64` resolution. Parsing the exact text then yields the
/// nearest `f64`. An integer part past the decimal range fails.
///
/// Results are kept below 2^96 so that every decimal token, written back out
/// by its `Display`, lexes again to the same value.
fn decimal_value(whole: &[u32], fraction: &[u32]) -> Option<f64> {
    let mut value = whole.iter().try_fold(Decimal::ZERO, |acc, &d| {
        acc.checked_mul(Decimal::TEN)?.checked_add(Decimal::from(d))
    })?;
    for (i, &digit) in fraction.iter().enumerate() {
        let Ok(scale) = u32::try_from(i + 1) else {
            break;
        };
        let Ok(part) = Decimal::try_new(i64::from(digit), scale) else {
            break;
        };
        match value.checked_add(part) {
            Some(sum) => value = sum,
            None => break,
        }
    }

    let nearest: f64 = value.to_string().parse().ok()?;
    if nearest >= DECIMAL_LIMIT {
        Some(f64::from_bits(DECIMAL_LIMIT.to_bits() - 1))
    } else {
        Some(nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input).tokens.into_iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn test_keywords_beat_identifiers() {
        assert_eq!(
            kinds("if AND div true"),
            vec![
                Token::Defined(DefinedToken::If),
                Token::Defined(DefinedToken::And),
                Token::Defined(DefinedToken::Div),
                Token::Bool(true),
            ]
        );
    }

    #[test]
    fn test_offsets() {
        let tokenized = lex("A = 10");
        let offsets: Vec<usize> = tokenized.tokens.iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert!(tokenized.successful());
    }

    #[test]
    fn test_stops_at_unknown_character() {
        let tokenized = lex("A = 1 # 2");
        assert!(!tokenized.successful());
        assert_eq!(tokenized.first_invalid_offset, 6);
        assert_eq!(tokenized.tokens.len(), 3);
    }

    #[test]
    fn test_integer_overflow_is_unrecognized() {
        let tokenized = lex("X 99999999999999999999");
        assert!(!tokenized.successful());
        assert_eq!(tokenized.first_invalid_offset, 2);
    }

    #[test]
    fn test_position_locate() {
        let text = "A = 1\nB = $";
        assert_eq!(Position::locate(text, 0), Position { line: 1, column: 1 });
        assert_eq!(Position::locate(text, 10), Position { line: 2, column: 5 });
    }

    #[test]
    fn test_into_result_reports_position() {
        let text = "A = 1\nB = $";
        let err = lex(text).into_result(text).unwrap_err();
        assert_eq!(err.offset, 10);
        assert_eq!(err.found, Some('$'));
        assert_eq!(err.position, Position { line: 2, column: 5 });
    }
}
