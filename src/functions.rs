use crate::token::Function;

lazy_static! {
    /// Keyword spellings of the built-in functions, longest first.
    ///
    /// The lexer tries the keywords in this order, so that `log10` is never
    /// read as `log` followed by `10`.
    pub static ref KEYWORDS: Vec<(&'static str, Function)> = {
        let mut keywords: Vec<_> = Function::ALL.iter().map(|&f| (f.name(), f)).collect();
        // stable sort: keywords of equal length keep their declaration order
        keywords.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        keywords
    };
}

impl Function {
    /// Call the function with already evaluated arguments.
    ///
    /// `args` must hold exactly [`arity`](#method.arity) values, which the
    /// parser guarantees. Domain errors give `NaN` or infinities, as in the
    /// underlying floating point functions.
    ///
    /// ```
    /// # use calcbot::Function;
    /// assert_eq!(Function::Log2.call(&[8.0]), 3.0);
    /// assert_eq!(Function::Pow.call(&[2.0, 10.0]), 1024.0);
    /// assert!(Function::Ln.call(&[-1.0]).is_nan());
    /// ```
    pub fn call(self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            Self::Log => libm::log(args[1]) / libm::log(args[0]),
            Self::Log10 => libm::log10(args[0]),
            Self::Log2 => libm::log2(args[0]),
            Self::Ln => libm::log(args[0]),
            Self::Pow => libm::pow(args[0], args[1]),
            Self::Exp => libm::exp(args[0]),
        }
    }
}
