use crate::ast::{BinOp, UnaryOp};

/// Literal or variable reference wrapped by [`Expr::Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Str(String),
    /// Variable reference (`COUNT`)
    Variable(String),
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal or variable
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "name"
    /// TOTAL
    /// ```
    Value(Value),

    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2, A + 1]
    /// ```
    ArrayLiteral(Vec<Expr>),

    /// Prefix operation
    ///
    /// # Examples
    /// ```text
    /// NOT DONE
    /// -X
    /// ```
    UnaryOperation { op: UnaryOp, operand: Box<Expr> },

    /// Infix operation
    ///
    /// # Example
    /// ```text
    /// A + B * 2
    /// ```
    BinaryOperation {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Indexing into a named array
    ///
    /// # Example
    /// ```text
    /// SCORES[I + 1]
    /// ```
    ArrayAccess { array: String, index: Box<Expr> },

    /// Method call, also valid as a statement
    ///
    /// # Example
    /// ```text
    /// average(SCORES, 10)
    /// ```
    MethodCall { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Value(Value::Variable(name.into()))
    }

    pub fn integer(n: i64) -> Self {
        Expr::Value(Value::Integer(n))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOperation {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOperation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Assignment target. Only a bare variable or an array element.
#[derive(Debug, Clone, PartialEq)]
pub enum LeftSide {
    Variable(String),
    ArrayAccess { array: String, index: Box<Expr> },
}

impl From<LeftSide> for Expr {
    fn from(target: LeftSide) -> Self {
        match target {
            LeftSide::Variable(name) => Expr::variable(name),
            LeftSide::ArrayAccess { array, index } => Expr::ArrayAccess { array, index },
        }
    }
}

impl TryFrom<Expr> for LeftSide {
    type Error = Expr;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Value(Value::Variable(name)) => Ok(LeftSide::Variable(name)),
            Expr::ArrayAccess { array, index } => Ok(LeftSide::ArrayAccess { array, index }),
            other => Err(other),
        }
    }
}
