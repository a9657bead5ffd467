use crate::ast::DefinedToken;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    /// Logical OR (`OR`)
    Or,
    /// Logical AND (`AND`)
    And,

    // Equality
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,

    // Comparison
    /// Greater than (`>`)
    GreaterThan,
    /// Less than (`<`)
    LessThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than or equal (`<=`)
    LessEqual,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Integer division (`div`)
    Div,
    /// Modulo (`mod`)
    Mod,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Equal | BinOp::NotEqual => 3,
            BinOp::GreaterThan | BinOp::LessThan | BinOp::GreaterEqual | BinOp::LessEqual => 4,
            BinOp::Add | BinOp::Subtract => 5,
            BinOp::Multiply | BinOp::Div | BinOp::Mod => 6,
        }
    }

    /// Maps an infix-capable token to its operator.
    pub fn from_token(token: DefinedToken) -> Option<BinOp> {
        if !token.operator_type().is_binary() {
            return None;
        }
        let op = match token {
            DefinedToken::Or => BinOp::Or,
            DefinedToken::And => BinOp::And,
            DefinedToken::Equal => BinOp::Equal,
            DefinedToken::NotEqual => BinOp::NotEqual,
            DefinedToken::Gt => BinOp::GreaterThan,
            DefinedToken::Lt => BinOp::LessThan,
            DefinedToken::GtEq => BinOp::GreaterEqual,
            DefinedToken::LtEq => BinOp::LessEqual,
            DefinedToken::Plus => BinOp::Add,
            DefinedToken::Minus => BinOp::Subtract,
            DefinedToken::Star => BinOp::Multiply,
            DefinedToken::Div => BinOp::Div,
            DefinedToken::Mod => BinOp::Mod,
            _ => return None,
        };
        Some(op)
    }

    pub fn token(self) -> DefinedToken {
        match self {
            BinOp::Or => DefinedToken::Or,
            BinOp::And => DefinedToken::And,
            BinOp::Equal => DefinedToken::Equal,
            BinOp::NotEqual => DefinedToken::NotEqual,
            BinOp::GreaterThan => DefinedToken::Gt,
            BinOp::LessThan => DefinedToken::Lt,
            BinOp::GreaterEqual => DefinedToken::GtEq,
            BinOp::LessEqual => DefinedToken::LtEq,
            BinOp::Add => DefinedToken::Plus,
            BinOp::Subtract => DefinedToken::Minus,
            BinOp::Multiply => DefinedToken::Star,
            BinOp::Div => DefinedToken::Div,
            BinOp::Mod => DefinedToken::Mod,
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation (`NOT`)
    Not,
    /// Arithmetic negation (`-`)
    Negate,
}

impl UnaryOp {
    /// Maps a prefix-capable token to its operator.
    pub fn from_token(token: DefinedToken) -> Option<UnaryOp> {
        if !token.operator_type().is_unary() {
            return None;
        }
        match token {
            DefinedToken::Not => Some(UnaryOp::Not),
            DefinedToken::Minus => Some(UnaryOp::Negate),
            _ => None,
        }
    }

    pub fn token(self) -> DefinedToken {
        match self {
            UnaryOp::Not => DefinedToken::Not,
            UnaryOp::Negate => DefinedToken::Minus,
        }
    }
}
