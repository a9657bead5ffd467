pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cursor;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{BinOp, DefinedToken, Expr, LeftSide, Statement, Token, UnaryOp, Value};
pub use cursor::Cursor;
pub use lexer::{LexError, Lexer, Position, Tokenized, lex};
pub use output::{program_to_json, tokens_to_json};
pub use parser::{FrontendError, ParseError, Parser, parse_source};
