use tracing::trace;

use crate::{
    ast::{Binding, Expr, Position, Statement},
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Resolve},
            function::range::checked_range,
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a `foreach` loop.
    ///
    /// The source is evaluated once, in the enclosing scope. For each of its
    /// elements a new scope is pushed, the binding is made in it, the body is
    /// executed, and the scope is popped again. Nested loops therefore
    /// produce the Cartesian product of their sources with the outer loop
    /// varying slowest.
    ///
    /// What a source iterates over:
    /// - a range or list: its elements in order (`5..1` is empty). A range
    ///   literal is walked without building the list first,
    /// - text: its characters,
    /// - a tile group: its tile codes.
    ///
    /// # Errors
    /// - [`EvalError::NotIterable`] if the source is any other value.
    /// - [`EvalError::TooManyItems`] if a range is longer than
    ///   [`EngineConfig::max_items`](crate::config::EngineConfig::max_items).
    /// - [`EvalError::NestingTooDeep`] if the loop exceeds the depth limit.
    /// - Any error from binding or from the body.
    pub fn eval_foreach(&mut self,
                        binding: &Binding,
                        source: &Expr,
                        body: &[Statement],
                        position: Position)
                        -> EvalResult<()> {
        self.descend(position, |this| {
                if let Expr::NumberRange { start,
                                           end,
                                           position: at, } = source
                {
                    let range = checked_range(*start, *end, &this.config, *at)?;
                    trace!(%binding, start, end, "entering foreach over range");
                    return this.iterate(binding, range.map(Value::Integer), body, position);
                }

                let value = this.eval_expr(source, Resolve::Strict)?;
                let items = value.elements()
                                 .ok_or_else(|| EvalError::NotIterable { node:     source.describe(),
                                                                         found:    value.type_name(),
                                                                         position: source.position(), })?;
                trace!(%binding, iterations = items.len(), "entering foreach");
                this.iterate(binding, items, body, position)
            })
    }

    /// Runs `body` once per item, each time in a fresh scope holding the
    /// binding.
    fn iterate(&mut self,
               binding: &Binding,
               items: impl IntoIterator<Item = Value>,
               body: &[Statement],
               position: Position)
               -> EvalResult<()> {
        for item in items {
            self.push_scope();
            let result = self.bind(binding, item, position)
                             .and_then(|()| self.exec_body(body, position));
            self.pop_scope();
            result?;
        }
        Ok(())
    }
}
