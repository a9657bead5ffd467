use std::fmt;

use crate::{
    ast::{BinOp, Branch, DefinedToken, Expr, LeftSide, Statement, Token, UnaryOp, Value},
    lexer::{LexError, Position, lex},
};

/// A grammar rule: consumes tokens and yields a node, or fails.
///
/// A failing rule may leave the index anywhere; [`Parser::attempt`] is what
/// puts it back.
type Rule<'a, T> = fn(&mut Parser<'a>) -> Option<T>;

/// Deepest nesting of operands and statement blocks before a parse is
/// rejected. Keeps the recursion well inside a default thread stack.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent parser with unbounded backtracking.
pub struct Parser<'a> {
    tokens: &'a [(usize, Token)],
    index: usize,
    /// Furthest token index at which a terminal failed to match
    furthest: usize,
    /// Current operand / block nesting
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(usize, Token)]) -> Self {
        Parser {
            tokens,
            index: 0,
            furthest: 0,
            depth: 0,
        }
    }

    /// Parses the whole token stream as a statement sequence.
    ///
    /// Returns `None` if the tokens are not a valid program.
    pub fn parse_program(&mut self) -> Option<Vec<Statement>> {
        let program = self.parse_all(Self::statements);
        match &program {
            Some(statements) => tracing::trace!(statements = statements.len(), "parsed program"),
            None => tracing::debug!(token = self.furthest, "rejected program"),
        }
        program
    }

    /// Parses the whole token stream as a single statement.
    pub fn parse_statement(&mut self) -> Option<Statement> {
        self.parse_all(Self::statement)
    }

    /// Parses the whole token stream as a single expression.
    pub fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_all(Self::expression)
    }

    /// Token index of the deepest failed match from the last parse.
    ///
    /// Equal to the token count when the input ended too early.
    pub fn furthest_failure(&self) -> usize {
        self.furthest
    }

    /// Describes the deepest failure against the source text the tokens came
    /// from.
    pub fn error(&self, source: &str) -> ParseError {
        let found = self.tokens.get(self.furthest).map(|(_, t)| t.clone());
        let offset = match self.tokens.get(self.furthest) {
            Some((offset, _)) => *offset,
            None => source.chars().count(),
        };
        ParseError {
            offset,
            position: Position::locate(source, offset),
            found,
        }
    }

    fn parse_all<T>(&mut self, rule: Rule<'a, T>) -> Option<T> {
        self.index = 0;
        self.furthest = 0;
        self.depth = 0;
        self.attempt(|p| {
            let result = rule(p)?;
            p.end_of_input()?;
            Some(result)
        })
    }

    // ---------------------------------------------------------------------
    // Combinators
    // ---------------------------------------------------------------------

    /// Runs `rule`, restoring the token index if it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.index;
        let result = rule(self);
        if result.is_none() {
            self.index = start;
        }
        result
    }

    /// Tries each rule in order from the same position; first success wins.
    fn first_of<T>(&mut self, rules: &[Rule<'a, T>]) -> Option<T> {
        rules.iter().find_map(|rule| self.attempt(*rule))
    }

    /// Runs `rule` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            return self.fail();
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn fail<T>(&mut self) -> Option<T> {
        self.furthest = self.furthest.max(self.index);
        None
    }

    // ---------------------------------------------------------------------
    // Terminals
    // ---------------------------------------------------------------------

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index).map(|(_, t)| t)
    }

    fn end_of_input(&mut self) -> Option<()> {
        if self.index == self.tokens.len() {
            Some(())
        } else {
            self.fail()
        }
    }

    fn expect(&mut self, expected: DefinedToken) -> Option<()> {
        match self.peek() {
            Some(token) if token.is(expected) => {
                self.index += 1;
                Some(())
            }
            _ => self.fail(),
        }
    }

    /// Consumes `expected` if it is next.
    fn accept(&mut self, expected: DefinedToken) -> bool {
        self.attempt(|p| p.expect(expected)).is_some()
    }

    fn defined(&mut self) -> Option<DefinedToken> {
        match self.peek() {
            Some(Token::Defined(d)) => {
                self.index += 1;
                Some(*d)
            }
            _ => self.fail(),
        }
    }

    fn variable_name(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::VariableName(name)) => {
                self.index += 1;
                Some(name.clone())
            }
            _ => self.fail(),
        }
    }

    fn method_name(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::MethodName(name)) => {
                self.index += 1;
                Some(name.clone())
            }
            _ => self.fail(),
        }
    }

    fn skip_newlines(&mut self) {
        while self.accept(DefinedToken::Newline) {}
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    /// Zero or more statements, each ended by newlines (or end of input).
    fn statements(&mut self) -> Option<Vec<Statement>> {
        self.nested(|p| {
            p.skip_newlines();

            let mut statements = vec![];
            while let Some(statement) = p.attempt(|p| {
                let statement = p.statement()?;
                p.terminator()?;
                Some(statement)
            }) {
                statements.push(statement);
            }
            Some(statements)
        })
    }

    fn terminator(&mut self) -> Option<()> {
        if self.index == self.tokens.len() {
            return Some(());
        }
        self.expect(DefinedToken::Newline)?;
        self.skip_newlines();
        Some(())
    }

    fn statement(&mut self) -> Option<Statement> {
        self.first_of(&[Self::call_statement, Self::command, Self::assignment])
    }

    fn call_statement(&mut self) -> Option<Statement> {
        let (name, args) = self.call()?;
        Some(Statement::MethodCall { name, args })
    }

    fn command(&mut self) -> Option<Statement> {
        let keyword = self.defined()?;
        match command_handler(keyword) {
            Some(handler) => handler(self),
            None => self.fail(),
        }
    }

    fn output_command(&mut self) -> Option<Statement> {
        Some(Statement::Output(self.expression_list()?))
    }

    fn input_command(&mut self) -> Option<Statement> {
        Some(Statement::Input(self.variable_name()?))
    }

    fn if_command(&mut self) -> Option<Statement> {
        let mut branches = vec![self.guarded_branch()?];

        while self.accept(DefinedToken::Else) {
            let branch = self.first_of(&[Self::else_if_branch, Self::else_branch])?;
            branches.push(branch);
        }

        self.expect(DefinedToken::End)?;
        self.accept(DefinedToken::If);
        Some(Statement::If(branches))
    }

    /// `cond then NEWLINE stmts`
    fn guarded_branch(&mut self) -> Option<Branch> {
        let condition = self.expression()?;
        self.expect(DefinedToken::Then)?;
        self.expect(DefinedToken::Newline)?;
        let body = self.statements()?;
        Some(Branch { condition, body })
    }

    fn else_if_branch(&mut self) -> Option<Branch> {
        self.expect(DefinedToken::If)?;
        self.guarded_branch()
    }

    fn else_branch(&mut self) -> Option<Branch> {
        self.expect(DefinedToken::Newline)?;
        let body = self.statements()?;
        Some(Branch {
            condition: Expr::Value(Value::Bool(true)),
            body,
        })
    }

    fn loop_command(&mut self) -> Option<Statement> {
        let header = self.first_of(&[Self::while_header, Self::until_header, Self::range_header])?;
        self.expect(DefinedToken::Newline)?;
        let body = self.statements()?;
        self.expect(DefinedToken::End)?;
        self.accept(DefinedToken::Loop);
        Some(header.with_body(body))
    }

    fn while_header(&mut self) -> Option<LoopHeader> {
        self.expect(DefinedToken::While)?;
        Some(LoopHeader::While(self.expression()?))
    }

    fn until_header(&mut self) -> Option<LoopHeader> {
        self.expect(DefinedToken::Until)?;
        Some(LoopHeader::Until(self.expression()?))
    }

    fn range_header(&mut self) -> Option<LoopHeader> {
        let variable = self.variable_name()?;
        self.expect(DefinedToken::From)?;
        let start = self.expression()?;
        self.expect(DefinedToken::To)?;
        let end = self.expression()?;
        Some(LoopHeader::Range {
            variable,
            start,
            end,
        })
    }

    fn method_command(&mut self) -> Option<Statement> {
        let name = self.method_name()?;
        self.expect(DefinedToken::LParen)?;
        let params = self.parameter_list()?;
        self.expect(DefinedToken::RParen)?;
        self.expect(DefinedToken::Newline)?;
        let body = self.statements()?;
        self.expect(DefinedToken::End)?;
        self.accept(DefinedToken::Method);
        Some(Statement::MethodDefinition { name, params, body })
    }

    fn parameter_list(&mut self) -> Option<Vec<String>> {
        let mut params = vec![];
        let Some(first) = self.attempt(Self::variable_name) else {
            return Some(params);
        };
        params.push(first);
        while self.accept(DefinedToken::Comma) {
            params.push(self.variable_name()?);
        }
        Some(params)
    }

    fn assignment(&mut self) -> Option<Statement> {
        let target = self.first_of(&[Self::element_target, Self::variable_target])?;
        self.expect(DefinedToken::Equal)?;
        let value = self.expression()?;
        Some(Statement::Assignment { target, value })
    }

    fn element_target(&mut self) -> Option<LeftSide> {
        let (array, index) = self.element()?;
        Some(LeftSide::ArrayAccess {
            array,
            index: Box::new(index),
        })
    }

    fn variable_target(&mut self) -> Option<LeftSide> {
        Some(LeftSide::Variable(self.variable_name()?))
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    /// Precedence climbing over an operator stack and an operand stack.
    ///
    /// An incoming operator first collapses every stacked operator that binds
    /// at least as tightly, which makes every tier left-associative.
    fn expression(&mut self) -> Option<Expr> {
        let mut operands = vec![self.operand()?];
        let mut operators: Vec<BinOp> = vec![];

        while let Some((op, right)) = self.attempt(|p| {
            let op = p.binary_operator()?;
            let right = p.operand()?;
            Some((op, right))
        }) {
            while let Some(top) = operators.last() {
                if op.precedence() > top.precedence() {
                    break;
                }
                reduce(&mut operators, &mut operands)?;
            }
            operators.push(op);
            operands.push(right);
        }

        while !operators.is_empty() {
            reduce(&mut operators, &mut operands)?;
        }
        operands.pop()
    }

    fn binary_operator(&mut self) -> Option<BinOp> {
        let token = self.defined()?;
        match BinOp::from_token(token) {
            Some(op) => Some(op),
            None => {
                self.index -= 1;
                self.fail()
            }
        }
    }

    fn operand(&mut self) -> Option<Expr> {
        self.nested(|p| {
            p.first_of(&[
                Self::call_expression,
                Self::element_expression,
                Self::unary_operation,
                Self::array_literal,
                Self::value,
                Self::parenthesized,
            ])
        })
    }

    fn call_expression(&mut self) -> Option<Expr> {
        let (name, args) = self.call()?;
        Some(Expr::MethodCall { name, args })
    }

    fn element_expression(&mut self) -> Option<Expr> {
        let (array, index) = self.element()?;
        Some(Expr::ArrayAccess {
            array,
            index: Box::new(index),
        })
    }

    fn unary_operation(&mut self) -> Option<Expr> {
        let token = self.defined()?;
        let Some(op) = UnaryOp::from_token(token) else {
            self.index -= 1;
            return self.fail();
        };
        let operand = self.operand()?;
        Some(Expr::unary(op, operand))
    }

    fn array_literal(&mut self) -> Option<Expr> {
        self.expect(DefinedToken::LBracket)?;
        let items = self.expression_list()?;
        self.expect(DefinedToken::RBracket)?;
        Some(Expr::ArrayLiteral(items))
    }

    fn value(&mut self) -> Option<Expr> {
        let value = match self.peek() {
            Some(Token::Bool(b)) => Value::Bool(*b),
            Some(Token::Integer(n)) => Value::Integer(*n),
            Some(Token::Decimal(n)) => Value::Decimal(*n),
            Some(Token::Str(s)) => Value::Str(s.clone()),
            Some(Token::VariableName(name)) => Value::Variable(name.clone()),
            _ => return self.fail(),
        };
        self.index += 1;
        Some(Expr::Value(value))
    }

    fn parenthesized(&mut self) -> Option<Expr> {
        self.expect(DefinedToken::LParen)?;
        let expr = self.expression()?;
        self.expect(DefinedToken::RParen)?;
        Some(expr)
    }

    /// `MethodName '(' exprList ')'`
    fn call(&mut self) -> Option<(String, Vec<Expr>)> {
        let name = self.method_name()?;
        self.expect(DefinedToken::LParen)?;
        let args = self.expression_list()?;
        self.expect(DefinedToken::RParen)?;
        Some((name, args))
    }

    /// `VariableName '[' expr ']'`
    fn element(&mut self) -> Option<(String, Expr)> {
        let array = self.variable_name()?;
        self.expect(DefinedToken::LBracket)?;
        let index = self.expression()?;
        self.expect(DefinedToken::RBracket)?;
        Some((array, index))
    }

    /// Comma-separated expressions; may be empty, no trailing comma.
    fn expression_list(&mut self) -> Option<Vec<Expr>> {
        let mut items = vec![];
        let Some(first) = self.attempt(Self::expression) else {
            return Some(items);
        };
        items.push(first);
        while self.accept(DefinedToken::Comma) {
            items.push(self.expression()?);
        }
        Some(items)
    }
}

/// Keyword to handler table for command statements.
fn command_handler<'a>(keyword: DefinedToken) -> Option<Rule<'a, Statement>> {
    if !keyword.is_command() {
        return None;
    }
    let handler: Rule<'a, Statement> = match keyword {
        DefinedToken::Output => Parser::output_command,
        DefinedToken::Input => Parser::input_command,
        DefinedToken::If => Parser::if_command,
        DefinedToken::Loop => Parser::loop_command,
        DefinedToken::Method => Parser::method_command,
        _ => return None,
    };
    Some(handler)
}

/// Pops one operator and its two operands and pushes the combined node.
fn reduce(operators: &mut Vec<BinOp>, operands: &mut Vec<Expr>) -> Option<()> {
    let op = operators.pop()?;
    let right = operands.pop()?;
    let left = operands.pop()?;
    operands.push(Expr::binary(op, left, right));
    Some(())
}

enum LoopHeader {
    While(Expr),
    Until(Expr),
    Range {
        variable: String,
        start: Expr,
        end: Expr,
    },
}

impl LoopHeader {
    fn with_body(self, body: Vec<Statement>) -> Statement {
        match self {
            LoopHeader::While(condition) => Statement::LoopWhile { condition, body },
            LoopHeader::Until(condition) => Statement::LoopUntil { condition, body },
            LoopHeader::Range {
                variable,
                start,
                end,
            } => Statement::LoopRange {
                variable,
                start,
                end,
                body,
            },
        }
    }
}

/// Where parsing got furthest before every alternative was exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Character offset of the offending token
    pub offset: usize,
    pub position: Position,
    /// Offending token, `None` at end of input
    pub found: Option<Token>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(token) if token.is(DefinedToken::Newline) => {
                write!(f, "Unexpected end of line at {}", self.position)
            }
            Some(token) => write!(f, "Unexpected '{}' at {}", token, self.position),
            None => write!(f, "Unexpected end of input at {}", self.position),
        }
    }
}

impl std::error::Error for ParseError {}

/// Either stage of the front end rejected the source.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Lex(e) => write!(f, "Lexical error: {}", e),
            FrontendError::Parse(e) => write!(f, "Syntax error: {}", e),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Lex(e) => Some(e),
            FrontendError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(e: LexError) -> Self {
        FrontendError::Lex(e)
    }
}

impl From<ParseError> for FrontendError {
    fn from(e: ParseError) -> Self {
        FrontendError::Parse(e)
    }
}

/// Lexes and parses `source` in one go.
pub fn parse_source(source: &str) -> Result<Vec<Statement>, FrontendError> {
    let tokens = lex(source).into_result(source)?;
    let mut parser = Parser::new(&tokens);
    let program = parser.parse_program();
    program.ok_or_else(|| FrontendError::Parse(parser.error(source)))
}
