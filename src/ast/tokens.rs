use std::fmt;

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Boolean literal
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Bool(bool),

    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0
    /// ```
    Integer(i64),

    /// Decimal literal, always written with a point
    ///
    /// # Examples
    /// ```text
    /// 12.5
    /// 0.25
    /// ```
    Decimal(f64),

    /// String literal with escapes already resolved
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "two\nlines"
    /// ```
    Str(String),

    // Identifiers
    /// Identifier matching `[_A-Z][_0-9A-Z]*`
    ///
    /// # Examples
    /// ```text
    /// COUNT
    /// MY_VAR
    /// _TMP2
    /// ```
    VariableName(String),

    /// Identifier matching `[_a-z][_0-9A-Za-z]*`
    ///
    /// # Examples
    /// ```text
    /// average
    /// isEmpty
    /// ```
    MethodName(String),

    /// Any other letter-led identifier
    ///
    /// # Examples
    /// ```text
    /// Stack
    /// MyClass
    /// ```
    ClassName(String),

    /// Keyword, operator or punctuation from [`DEFINED_TOKENS`]
    Defined(DefinedToken),
}

impl Token {
    pub fn is(&self, defined: DefinedToken) -> bool {
        matches!(self, Token::Defined(d) if *d == defined)
    }
}

impl From<DefinedToken> for Token {
    fn from(defined: DefinedToken) -> Self {
        Token::Defined(defined)
    }
}

impl fmt::Display for Token {
    /// Writes the token as source text that lexes back to the same token.
    ///
    /// Holds for every token the lexer produces. Decimals are printed in
    /// full positional form, which the lexer accepts up to 2^96.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Bool(b) => write!(f, "{}", b),
            Token::Integer(n) => write!(f, "{}", n),
            Token::Decimal(n) => {
                let text = n.to_string();
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Token::Str(s) => {
                write!(f, "\"")?;
                for ch in s.chars() {
                    match ch {
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '"' => write!(f, "\\\"")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Token::VariableName(name) | Token::MethodName(name) | Token::ClassName(name) => {
                write!(f, "{}", name)
            }
            Token::Defined(d) => write!(f, "{}", d.literal()),
        }
    }
}

/// How an operator token may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorType {
    /// Not an operator
    None,
    /// Prefix only (`NOT`)
    Unary,
    /// Infix only
    Binary,
    /// Prefix or infix (`-`)
    Both,
}

impl OperatorType {
    pub fn is_unary(self) -> bool {
        matches!(self, OperatorType::Unary | OperatorType::Both)
    }

    pub fn is_binary(self) -> bool {
        matches!(self, OperatorType::Binary | OperatorType::Both)
    }
}

/// Tokens with a fixed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinedToken {
    // Keywords
    Then,
    While,
    Until,
    From,
    To,

    // Command starters
    Output,
    Input,
    If,
    Else,
    Loop,
    Method,
    End,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Newline,

    // Operators
    Equal,
    NotEqual,
    GtEq,
    LtEq,
    Gt,
    Lt,
    Not,
    And,
    Or,
    Plus,
    Minus,
    Star,
    Div,
    Mod,
}

/// Static metadata attached to one [`DefinedToken`].
#[derive(Debug, Clone, Copy)]
pub struct TokenSpec {
    pub token: DefinedToken,
    pub literal: &'static str,
    pub operator: OperatorType,
    pub command: bool,
}

const fn spec(
    token: DefinedToken,
    literal: &'static str,
    operator: OperatorType,
    command: bool,
) -> TokenSpec {
    TokenSpec {
        token,
        literal,
        operator,
        command,
    }
}

/// Every fixed token, in match order.
///
/// The lexer probes these top to bottom and keeps the first hit, so a
/// literal must come before any other literal that is its prefix
/// (`>=` before `>`, `<=` before `<`). Rows follow the declaration order of
/// [`DefinedToken`], which is how [`DefinedToken::spec`] indexes them.
pub const DEFINED_TOKENS: &[TokenSpec] = {
    use DefinedToken::*;
    use OperatorType as Op;
    &[
        spec(Then, "then", Op::None, false),
        spec(While, "while", Op::None, false),
        spec(Until, "until", Op::None, false),
        spec(From, "from", Op::None, false),
        spec(To, "to", Op::None, false),
        spec(Output, "output", Op::None, true),
        spec(Input, "input", Op::None, true),
        spec(If, "if", Op::None, true),
        spec(Else, "else", Op::None, true),
        spec(Loop, "loop", Op::None, true),
        spec(Method, "method", Op::None, true),
        spec(End, "end", Op::None, true),
        spec(LParen, "(", Op::None, false),
        spec(RParen, ")", Op::None, false),
        spec(LBracket, "[", Op::None, false),
        spec(RBracket, "]", Op::None, false),
        spec(Comma, ",", Op::None, false),
        spec(Dot, ".", Op::None, false),
        spec(Newline, "\n", Op::None, false),
        spec(Equal, "=", Op::Binary, false),
        spec(NotEqual, "!=", Op::Binary, false),
        spec(GtEq, ">=", Op::Binary, false),
        spec(LtEq, "<=", Op::Binary, false),
        spec(Gt, ">", Op::Binary, false),
        spec(Lt, "<", Op::Binary, false),
        spec(Not, "NOT", Op::Unary, false),
        spec(And, "AND", Op::Binary, false),
        spec(Or, "OR", Op::Binary, false),
        spec(Plus, "+", Op::Binary, false),
        spec(Minus, "-", Op::Both, false),
        spec(Star, "*", Op::Binary, false),
        spec(Div, "div", Op::Binary, false),
        spec(Mod, "mod", Op::Binary, false),
    ]
};

impl DefinedToken {
    pub fn spec(self) -> &'static TokenSpec {
        &DEFINED_TOKENS[self as usize]
    }

    pub fn literal(self) -> &'static str {
        self.spec().literal
    }

    pub fn operator_type(self) -> OperatorType {
        self.spec().operator
    }

    /// True for tokens that introduce a command statement.
    pub fn is_command(self) -> bool {
        self.spec().command
    }

    /// Looks up an identifier-shaped literal (`if`, `AND`, `div`, ...).
    pub fn from_word(word: &str) -> Option<DefinedToken> {
        DEFINED_TOKENS
            .iter()
            .find(|s| s.literal == word)
            .filter(|s| s.literal.chars().all(|c| c.is_alphabetic()))
            .map(|s| s.token)
    }
}
