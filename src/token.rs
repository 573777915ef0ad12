use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal
    Number(f64),
    /// A variable name
    Identifier(String),
    /// One of the built-in function keywords
    Function(Function),
    /// A binary operator. `-` is also used for negation.
    Op(Op),
    /// `=`
    Assign,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// `;`, separating statements
    Semicolon,
    /// `,`, separating function arguments
    Comma,
    /// End of the input
    End,
}

impl Token {
    /// Get the punctuation token for `c`, if any
    pub fn from_char(c: char) -> Option<Token> {
        let token = match c {
            '+' => Token::Op(Op::Plus),
            '-' => Token::Op(Op::Minus),
            '*' => Token::Op(Op::Mul),
            '/' => Token::Op(Op::Div),
            '=' => Token::Assign,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ';' => Token::Semicolon,
            ',' => Token::Comma,
            _ => return None,
        };
        Some(token)
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(value) => write!(fmt, "number {}", value),
            Token::Identifier(name) => write!(fmt, "identifier '{}'", name),
            Token::Function(function) => write!(fmt, "'{}'", function.name()),
            Token::Op(op) => write!(fmt, "'{}'", op.symbol()),
            Token::Assign => write!(fmt, "'='"),
            Token::LParen => write!(fmt, "'('"),
            Token::RParen => write!(fmt, "')'"),
            Token::Semicolon => write!(fmt, "';'"),
            Token::Comma => write!(fmt, "','"),
            Token::End => write!(fmt, "end of input"),
        }
    }
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
}

/// Precedence of the unary minus, binding tighter than any binary operator
pub const NEGATION_PRECEDENCE: u8 = 3;

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// Check if the operator is left associative
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div => true,
        }
    }

    /// Apply the operator to two values, with IEEE-754 semantics
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Plus => left + right,
            Self::Minus => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }

    /// The character of the operator in the input
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

/// Built-in functions. Each one is a keyword of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `log(base, x)`
    Log,
    /// `log10(x)`
    Log10,
    /// `log2(x)`
    Log2,
    /// `ln(x)`
    Ln,
    /// `pow(base, exponent)`
    Pow,
    /// `exp(x)`
    Exp,
}

impl Function {
    /// All the functions, in declaration order
    pub const ALL: [Function; 6] = [
        Function::Log,
        Function::Log10,
        Function::Log2,
        Function::Ln,
        Function::Pow,
        Function::Exp,
    ];

    /// The keyword spelling of the function
    pub fn name(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Ln => "ln",
            Self::Pow => "pow",
            Self::Exp => "exp",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            Self::Log | Self::Pow => 2,
            Self::Log10 | Self::Log2 | Self::Ln | Self::Exp => 1,
        }
    }
}
