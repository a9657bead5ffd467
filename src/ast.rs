//! # Pseudocode Front End - Tokens and Abstract Syntax Tree
//!
//! This module defines everything the lexer produces and the parser hands to
//! a downstream code generator.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens and the ordered table of fixed tokens
//! - **[operators]** - Unary and binary operators with their precedence
//! - **[expressions]** - Expression nodes and assignment targets
//! - **[statements]** - Statement nodes (commands, assignments, calls)
//!
//! ## Quick Start
//!
//! ```text
//! method double(X)
//!     output X * 2
//! end method
//!
//! loop I from 1 to 3
//!     double(I)
//! end loop
//! ```
//!
//! ## Identifier Classes
//!
//! The case of an identifier decides what it is:
//!
//! - `COUNT`, `MY_VAR` are variables
//! - `average`, `isEmpty` are methods
//! - anything else letter-led (`Stack`) is a class name
//!
//! Keywords win over classification, so `AND` and `div` are operators and
//! `if` is never a method name.
//!
//! ## Operator Precedence
//!
//! Loosest to tightest, every tier left-associative:
//!
//! ```text
//! OR
//! AND
//! =  !=
//! >  <  >=  <=
//! +  -
//! *  div  mod
//! ```
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod tokens;

pub use expressions::{Expr, LeftSide, Value};
pub use operators::{BinOp, UnaryOp};
pub use statements::{Branch, Statement};
pub use tokens::{DEFINED_TOKENS, DefinedToken, OperatorType, Token, TokenSpec};
