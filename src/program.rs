use crate::ast::{Ast, Statement};
use crate::parser;
use crate::symbols::SymbolTable;
use crate::Error;
use log::debug;
use std::collections::BTreeSet;

/// Evaluate the program in `input`, and return the value of its last
/// statement.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// the program could not be read. Variables only live for the duration of
/// one call.
///
/// # Example
///
/// ```
/// # use calcbot::evaluate;
/// assert_eq!(evaluate("45 - 2 * 3"), Ok(39.0));
/// assert_eq!(evaluate("a = 3; b = a * 2; a + b"), Ok(9.0));
/// // variables are not kept from one call to the next
/// assert_eq!(evaluate("a"), Ok(0.0));
/// assert!(evaluate("45 -").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<f64, Error> {
    Program::parse(input).map(|program| program.eval())
}

/// Answer to a query, as shown to the person who sent it: either
/// `<query> ~> <value>` or the error message.
///
/// ```
/// # use calcbot::reply;
/// assert_eq!(reply("1 / 4"), "1 / 4 ~> 0.250000");
/// assert!(reply("1 +").starts_with("SyntaxError"));
/// ```
pub fn reply(query: &str) -> String {
    answer(query).unwrap_or_else(|error| error.to_string())
}

/// Evaluate `query`, formatting the result as `<query> ~> <value>`.
///
/// Values have six decimals; infinities are shown as `+Inf` and `-Inf`,
/// and not-a-number as `NaN`.
///
/// ```
/// # use calcbot::answer;
/// assert_eq!(answer("2 * 3").unwrap(), "2 * 3 ~> 6.000000");
/// assert_eq!(answer("-1 / 0").unwrap(), "-1 / 0 ~> -Inf");
/// assert!(answer("2 *").is_err());
/// ```
pub fn answer(query: &str) -> Result<String, Error> {
    evaluate(query).map(|value| format!("{} ~> {}", query, format_value(value)))
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "+Inf".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_owned()
    } else {
        format!("{:.6}", value)
    }
}

/// A parsed and optimized program.
///
/// # Examples
/// ```
/// # use calcbot::Program;
/// let program = Program::parse("r = 2; 3 * r * r").unwrap();
/// assert_eq!(program.eval(), 12.0);
/// assert_eq!(program.eval(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Parse the given `program`.
    ///
    /// # Examples
    /// ```
    /// # use calcbot::Program;
    /// // A valid program
    /// assert!(Program::parse("x = 3; log(2, x + 5)").is_ok());
    /// // invalid programs
    /// assert!(Program::parse("3 $ 5").is_err());
    /// assert!(Program::parse("pow(2)").is_err());
    /// ```
    pub fn parse(program: &str) -> Result<Self, Error> {
        let statements: Vec<Statement> = parser::parse(program)?
            .into_iter()
            .map(Statement::optimize)
            .collect();
        debug!("parsed {} statement(s) from {:?}", statements.len(), program);
        Ok(Self { statements })
    }

    /// Evaluate the program with a new, empty, symbol table.
    pub fn eval(&self) -> f64 {
        self.eval_with(&mut SymbolTable::new())
    }

    /// Evaluate the program with the given `symbols`, which are updated by
    /// the assignments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use calcbot::{Program, SymbolTable};
    /// let program = Program::parse("y = x * 2; y + 1").unwrap();
    ///
    /// let mut symbols = SymbolTable::new();
    /// symbols.assign("x", 5.0);
    /// assert_eq!(program.eval_with(&mut symbols), 11.0);
    /// assert_eq!(symbols.get("y"), 10.0);
    /// ```
    pub fn eval_with(&self, symbols: &mut SymbolTable) -> f64 {
        let mut result = 0.0;
        for statement in &self.statements {
            result = match statement {
                Statement::Expr(ast) => Self::inner_eval(ast, symbols),
                Statement::Assign(name, ast) => {
                    let value = Self::inner_eval(ast, symbols);
                    symbols.assign(name, value)
                }
            };
        }
        debug!("evaluated to {}", result);
        result
    }

    fn inner_eval(ast: &Ast, symbols: &SymbolTable) -> f64 {
        match *ast {
            Ast::Variable(ref name) => symbols.get(name),
            Ast::Value(number) => number,
            Ast::Neg(ref operand) => -Self::inner_eval(operand, symbols),
            Ast::Binary(op, ref left, ref right) => op.apply(
                Self::inner_eval(left, symbols),
                Self::inner_eval(right, symbols),
            ),
            Ast::Call(function, ref args) => {
                let args: Vec<f64> = args
                    .iter()
                    .map(|arg| Self::inner_eval(arg, symbols))
                    .collect();
                function.call(&args)
            }
        }
    }

    /// Names of the variables read by the program.
    ///
    /// # Examples
    /// ```
    /// # use calcbot::Program;
    /// let program = Program::parse("a = b + 1; a * c").unwrap();
    /// assert_eq!(program.variables().into_iter().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variables = Vec::new();
        for statement in &self.statements {
            statement.expr().variables(&mut variables);
        }
        variables.into_iter().collect()
    }

    /// Names of the variables assigned by the program.
    pub fn assigned(&self) -> BTreeSet<&str> {
        self.statements
            .iter()
            .filter_map(|statement| match statement {
                Statement::Assign(name, _) => Some(name.as_str()),
                Statement::Expr(_) => None,
            })
            .collect()
    }

    /// The statements of the program, after constant propagation
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
