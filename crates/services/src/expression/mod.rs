//! The expression engine: compose a canonical expression from guided
//! operator inputs, then evaluate it with a grammar-restricted parser.

mod builder;
mod eval;
mod parser;
mod token;

pub use builder::compose;
pub use eval::evaluate;
pub use parser::{Expr, Parser};
pub use token::{Func, Token, tokenize};
