use std::collections::HashMap;

use crate::{
    ast::{Binding, Position},
    config::EngineConfig,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Pushes a new empty scope onto the scope stack.
    ///
    /// # Example
    /// ```
    /// use mtl::{config::EngineConfig, interpreter::evaluator::core::Interpreter};
    ///
    /// let mut interpreter = Interpreter::new(EngineConfig::default());
    /// interpreter.push_scope();
    ///
    /// assert_eq!(interpreter.scope_stack.len(), 2);
    /// ```
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Removes the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Retrieves a variable from the scope stack.
    ///
    /// Lookup begins at the innermost scope and proceeds outward toward the
    /// root scope, so inner bindings shadow outer ones.
    ///
    /// # Example
    /// ```
    /// use mtl::{
    ///     config::EngineConfig,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(EngineConfig::default());
    /// interpreter.define_local("n", Value::Integer(1));
    /// interpreter.push_scope();
    /// interpreter.define_local("n", Value::Integer(2));
    ///
    /// assert_eq!(interpreter.get_variable("n"), Some(&Value::Integer(2)));
    /// interpreter.pop_scope();
    /// assert_eq!(interpreter.get_variable("n"), Some(&Value::Integer(1)));
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.scope_stack
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Binds a variable in the innermost scope, replacing a binding of the
    /// same name in that scope.
    pub fn define_local(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name.to_string(), value);
        } else {
            self.scope_stack
                .push(HashMap::from([(name.to_string(), value)]));
        }
    }

    /// Binds `value` to the names of `binding` in the innermost scope.
    ///
    /// A tuple binding requires a list of exactly as many elements and binds
    /// them positionally.
    ///
    /// # Errors
    /// Returns [`EvalError::DestructureMismatch`] when the value is not a
    /// list of the right length.
    pub fn bind(&mut self, binding: &Binding, value: Value, position: Position) -> EvalResult<()> {
        match binding {
            Binding::Name(name) => self.define_local(name, value),
            Binding::Tuple(names) => {
                let items = match &value {
                    Value::List(items) if items.len() == names.len() => items.clone(),
                    Value::List(items) => {
                        return Err(EvalError::DestructureMismatch { expected: names.len(),
                                                                    found:    format!("a list of {} element(s)",
                                                                                      items.len()),
                                                                    position });
                    },
                    other => {
                        return Err(EvalError::DestructureMismatch { expected: names.len(),
                                                                    found:    format!("a {}",
                                                                                      other.type_name()),
                                                                    position });
                    },
                };
                for (name, item) in names.iter().zip(items.iter()) {
                    self.define_local(name, item.clone());
                }
            },
        }
        Ok(())
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// Loops, calls, tuples and operators each take a level, which keeps
    /// recursion bounded by [`EngineConfig::max_depth`](crate::config::EngineConfig).
    ///
    /// # Errors
    /// Returns [`EvalError::NestingTooDeep`] if the limit is already reached,
    /// otherwise whatever `f` returns.
    pub fn descend<T>(&mut self,
                      position: Position,
                      f: impl FnOnce(&mut Self) -> EvalResult<T>)
                      -> EvalResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(EvalError::NestingTooDeep { limit: self.config.max_depth,
                                                   position });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Checks that a builtin received exactly `N` arguments and returns them as
/// an array reference for destructuring.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     interpreter::{evaluator::utils::expect_args, value::core::Value},
/// };
///
/// let args = vec![Value::Integer(2), Value::Integer(5)];
/// let [low, high] = expect_args::<2>("range", &args, Position::new(3, 1)).unwrap();
/// assert_eq!((low, high), (&Value::Integer(2), &Value::Integer(5)));
///
/// assert!(expect_args::<3>("range", &args, Position::new(3, 1)).is_err());
/// ```
pub fn expect_args<'v, const N: usize>(name: &str,
                                       args: &'v [Value],
                                       position: Position)
                                       -> EvalResult<&'v [Value; N]> {
    args.try_into()
        .map_err(|_| EvalError::ArgumentCountMismatch { name: name.to_string(),
                                                        expected: N.to_string(),
                                                        found: args.len(),
                                                        position })
}

/// Checks that `found` items of `what` fit within
/// [`EngineConfig::max_items`].
///
/// Counts are `u128` so that callers can pass exact sizes computed from
/// `i64` bounds or factorials without overflowing first.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     config::EngineConfig,
///     interpreter::evaluator::utils::ensure_items,
/// };
///
/// let config = EngineConfig::default().with_max_items(10);
///
/// assert!(ensure_items("range", 10, &config, Position::new(1, 1)).is_ok());
/// assert!(ensure_items("range", 11, &config, Position::new(1, 1)).is_err());
/// ```
pub fn ensure_items(what: &'static str,
                    found: u128,
                    config: &EngineConfig,
                    position: Position)
                    -> EvalResult<()> {
    if u128::try_from(config.max_items).is_ok_and(|limit| found > limit) {
        return Err(EvalError::TooManyItems { what,
                                             found,
                                             limit: config.max_items,
                                             position });
    }
    Ok(())
}
