use crate::token::{Function, Op};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A variable, read from the symbol table
    Variable(String),
    /// A constant value
    Value(f64),
    /// -<operand>
    Neg(Box<Ast>),
    /// <left> op <right>
    Binary(Op, Box<Ast>, Box<Ast>),
    /// function(<args>...)
    Call(Function, Vec<Ast>),
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Variable(str), Ast::Variable(str2)) => str == str2,
            (Ast::Value(v), Ast::Value(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Neg(a), Ast::Neg(a2)) => a == a2,
            (Ast::Binary(op, a, b), Ast::Binary(op2, a2, b2)) => op == op2 && a == a2 && b == b2,
            (Ast::Call(f, args), Ast::Call(f2, args2)) => f == f2 && args == args2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

impl Hash for Ast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Ast::Variable(str) => {
                state.write_u8(0);
                str.hash(state)
            }
            Ast::Value(v) => {
                state.write_u8(1);
                v.to_le_bytes().hash(state)
            }
            Ast::Neg(a) => {
                state.write_u8(2);
                a.hash(state);
            }
            Ast::Binary(op, a, b) => {
                state.write_u8(3);
                op.hash(state);
                a.hash(state);
                b.hash(state);
            }
            Ast::Call(f, args) => {
                state.write_u8(4);
                f.hash(state);
                args.hash(state);
            }
        }
    }
}

/// Fully parenthesized rendering, showing how the expression was grouped
impl Display for Ast {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Ast::Variable(name) => write!(fmt, "{}", name),
            Ast::Value(value) => write!(fmt, "{}", value),
            Ast::Neg(operand) => write!(fmt, "(-{})", operand),
            Ast::Binary(op, left, right) => write!(fmt, "({} {} {})", left, op.symbol(), right),
            Ast::Call(function, args) => {
                write!(fmt, "{}(", function.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{}", arg)?;
                }
                write!(fmt, ")")
            }
        }
    }
}

impl Ast {
    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<f64> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    /// Optimize the AST by doing constants propagation.
    ///
    /// Folding uses the same operations as the evaluation, so the result of
    /// the expression does not change, `NaN` and infinities included.
    pub fn optimize(self) -> Self {
        match self {
            Self::Variable(_) | Self::Value(_) => self,
            Self::Neg(operand) => {
                let operand = operand.optimize();
                if let Some(operand) = operand.value() {
                    return Self::Value(-operand);
                }
                return Self::Neg(Box::new(operand));
            }
            Self::Binary(op, left, right) => {
                let left = left.optimize();
                let right = right.optimize();
                if let (Some(left), Some(right)) = (left.value(), right.value()) {
                    return Self::Value(op.apply(left, right));
                }
                return Self::Binary(op, Box::new(left), Box::new(right));
            }
            Self::Call(function, args) => {
                let args: Vec<Ast> = args.into_iter().map(Ast::optimize).collect();
                let values: Option<Vec<f64>> = args.iter().map(Ast::value).collect();
                if let Some(values) = values {
                    return Self::Value(function.call(&values));
                }
                return Self::Call(function, args);
            }
        }
    }

    /// Collect the names of all the variables read by this expression
    pub fn variables<'a>(&'a self, variables: &mut Vec<&'a str>) {
        match self {
            Ast::Variable(name) => variables.push(name),
            Ast::Value(_) => {}
            Ast::Neg(operand) => operand.variables(variables),
            Ast::Binary(_, left, right) => {
                left.variables(variables);
                right.variables(variables);
            }
            Ast::Call(_, args) => {
                for arg in args {
                    arg.variables(variables);
                }
            }
        }
    }
}

/// A single statement of a program
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// A bare expression
    Expr(Ast),
    /// <name> = <value>
    Assign(String, Ast),
}

impl Statement {
    /// The expression computing the value of the statement
    pub fn expr(&self) -> &Ast {
        match self {
            Statement::Expr(ast) | Statement::Assign(_, ast) => ast,
        }
    }

    /// Constant propagation on the expression of the statement
    pub fn optimize(self) -> Self {
        match self {
            Statement::Expr(ast) => Statement::Expr(ast.optimize()),
            Statement::Assign(name, ast) => Statement::Assign(name, ast.optimize()),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Statement::Expr(ast) => write!(fmt, "{}", ast),
            Statement::Assign(name, ast) => write!(fmt, "{} = {}", name, ast),
        }
    }
}
