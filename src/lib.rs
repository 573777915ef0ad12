#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

//! Calcbot, a small language for arithmetic with variables.
//!
//! The easiest way to use this crate is with the
//! [`evaluate`](fn.evaluate.html) function, which runs a program and returns
//! the value of its last statement:
//!
//! ```
//! assert_eq!(calcbot::evaluate("3 + 5 * 2"), Ok(13.0));
//! assert_eq!(calcbot::evaluate("r = 2; pow(r, 3) - 1"), Ok(7.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of a
//! program with the [`Program`](struct.Program.html) type:
//!
//! ```
//! use calcbot::{Program, SymbolTable};
//!
//! let program = Program::parse("total = price * (1 + rate); total").unwrap();
//!
//! let mut symbols = SymbolTable::new();
//! symbols.assign("price", 100.0);
//! symbols.assign("rate", 0.25);
//! assert_eq!(program.eval_with(&mut symbols), 125.0);
//! assert_eq!(symbols.get("total"), 125.0);
//! ```
//!
//! # Language definition
//!
//! A program is one or more statements separated by `;`. A statement is
//! either an expression, or an assignment `name = expression`, which also
//! gives the assigned value. Expressions can contain the following elements:
//!
//! - float literal values: `12`, `12.`, `.5`, `6.67428e-11`, ...;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction and
//!   negation, `*` for multiplication and `/` for division;
//! - variables. Variable names start with a letter (any Unicode letter), and
//!   can contain letters, digits and `_`. A variable that was never assigned
//!   is `0`;
//! - function calls: `log(base, x)`, `log10(x)`, `log2(x)`, `ln(x)`,
//!   `pow(base, exponent)` and `exp(x)`.
//!
//! Function names are keywords, and are read before variable names: `lnx`
//! is `ln` followed by `x`.
//!
//! Any other symbol is forbidden in the input.
//!
//! Negations, parenthesis and calls can be nested at most
//! [`MAX_DEPTH`](constant.MAX_DEPTH.html) levels deep, and an expression tree
//! is at most that high (a chain of `a + b + c ...` counts one level per
//! operator). Deeper expressions are rejected with a syntax error.
//!
//! The mathematical operators obey the usual relations of associativity and
//! precedence, but still carry the floating point properties: there is no
//! error for a division by zero or the logarithm of a negative number, the
//! result is an infinity or `NaN`.
//!
//! # Technical details
//!
//! Programs are tokenized lazily, and parsed with an operator precedence
//! parser into an AST. The AST is optimized with constant propagation, then
//! evaluated with a symbol table that lives only for one evaluation.

#[macro_use]
extern crate lazy_static;

mod ast;
mod error;
mod functions;
mod lexer;
mod parser;
mod program;
mod symbols;
mod token;

pub use ast::{Ast, Statement};
pub use error::Error;
pub use functions::KEYWORDS;
pub use lexer::{is_identifier, Lexer};
pub use parser::MAX_DEPTH;
pub use program::{answer, evaluate, reply, Program};
pub use symbols::SymbolTable;
pub use token::{Function, Op, Token};
