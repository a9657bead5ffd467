use crate::ast::{Expr, LeftSide};

/// One `if`/`else if`/`else` arm.
///
/// A trailing `else` is stored with a literal `true` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Vec<Statement>,
}

/// Statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Bare method call
    ///
    /// # Example
    /// ```text
    /// swap(A, B)
    /// ```
    MethodCall { name: String, args: Vec<Expr> },

    /// # Example
    /// ```text
    /// output "Total:", TOTAL
    /// ```
    Output(Vec<Expr>),

    /// # Example
    /// ```text
    /// input NAME
    /// ```
    Input(String),

    /// Conditional chain, branches in source order
    ///
    /// # Example
    /// ```text
    /// if A > B then
    ///     output A
    /// else
    ///     output B
    /// end if
    /// ```
    If(Vec<Branch>),

    /// # Example
    /// ```text
    /// loop while I < 10
    ///     I = I + 1
    /// end loop
    /// ```
    LoopWhile { condition: Expr, body: Vec<Statement> },

    /// # Example
    /// ```text
    /// loop until DONE
    ///     input DONE
    /// end loop
    /// ```
    LoopUntil { condition: Expr, body: Vec<Statement> },

    /// # Example
    /// ```text
    /// loop I from 0 to 9
    ///     output I
    /// end loop
    /// ```
    LoopRange {
        variable: String,
        start: Expr,
        end: Expr,
        body: Vec<Statement>,
    },

    /// # Example
    /// ```text
    /// method greet(NAME)
    ///     output "Hi ", NAME
    /// end method
    /// ```
    MethodDefinition {
        name: String,
        params: Vec<String>,
        body: Vec<Statement>,
    },

    /// # Examples
    /// ```text
    /// A = 2
    /// LIST[I] = LIST[I] * 2
    /// ```
    Assignment { target: LeftSide, value: Expr },
}
