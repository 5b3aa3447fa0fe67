use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{Expr, MetaValue, Metadata, Position, Program, QuoteStyle, Statement},
    config::EngineConfig,
    error::EvalError,
    interpreter::{
        evaluator::{
            function::{core::BUILTIN_FUNCTIONS, range::inclusive_range},
            utils::ensure_items,
        },
        value::{core::Value, variation::Variation},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// How an identifier that is bound in no scope is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolve {
    /// The identifier must be bound.
    Strict,
    /// The identifier stands for the symbol of the same name, if
    /// [`EngineConfig::symbol_atoms`] allows it.
    Atom,
}

/// Expands one template into its variations.
///
/// An `Interpreter` is built for a single compile and consumed by
/// [`Interpreter::evaluate`]; nothing is shared between compiles, so
/// independent templates can be expanded on different threads.
///
/// ## State
///
/// - `scope_stack`: the chain of variable bindings. The root frame holds the
///   metadata and the builtins; every `foreach` iteration pushes a frame and
///   pops it when the iteration ends.
/// - the variation buffer: tile codes accumulated for the variation under
///   construction. Tiles added by a block are removed again when the block
///   finishes, so enclosing blocks act as a shared prefix.
/// - the output list of finished variations.
pub struct Interpreter {
    pub scope_stack:  Vec<HashMap<String, Value>>,
    /// Limits and resolution policy.
    pub config:       EngineConfig,
    pub(crate) depth: usize,
    buffer:           Vec<String>,
    variations:       Vec<Variation>,
    name:             Option<String>,
    description:      Option<String>,
}

impl Interpreter {
    /// Creates an interpreter with a single empty root scope.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { scope_stack: vec![HashMap::new()],
               config,
               depth: 0,
               buffer: Vec::new(),
               variations: Vec::new(),
               name: None,
               description: None }
    }

    /// Evaluates a program and returns every variation it denotes.
    ///
    /// The root scope is seeded with the builtins and then the metadata, so
    /// metadata keys such as `name` or `suits` are readable as variables.
    /// The body is then executed in order; see [`Interpreter::exec_body`] for
    /// when variations are emitted.
    ///
    /// # Errors
    /// Returns the first [`EvalError`] encountered. No partial output is
    /// returned.
    ///
    /// # Example
    /// ```
    /// use mtl::{
    ///     config::EngineConfig,
    ///     interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse},
    /// };
    ///
    /// let source = "metadata { name = \"Runs\" }
    ///               variations { foreach n in 1..3 { sequence(n, c, 3) } }";
    /// let program = parse(&tokenize(source).unwrap()).unwrap();
    ///
    /// let variations = Interpreter::new(EngineConfig::default()).evaluate(&program).unwrap();
    /// assert_eq!(variations.len(), 3);
    /// assert_eq!(variations[2].tiles, ["3c", "4c", "5c"]);
    /// assert_eq!(variations[2].name.as_deref(), Some("Runs"));
    /// ```
    pub fn evaluate(mut self, program: &Program) -> EvalResult<Vec<Variation>> {
        self.seed_root_scope(&program.metadata);
        self.name = text_entry(&program.metadata, "name");
        self.description = text_entry(&program.metadata, "description");

        debug!(statements = program.body.len(),
               max_depth = self.config.max_depth,
               "evaluating template");
        self.exec_body(&program.body, Position::new(1, 1))?;
        debug!(variations = self.variations.len(), "evaluation finished");

        Ok(self.variations)
    }

    fn seed_root_scope(&mut self, metadata: &Metadata) {
        let mut root = HashMap::new();
        for name in BUILTIN_FUNCTIONS {
            root.insert((*name).to_string(), Value::Builtin(*name));
        }
        for (key, value) in metadata.iter() {
            root.insert(key.to_string(), Value::from(value));
        }
        self.scope_stack = vec![root];
    }

    /// Executes the statements of one block.
    ///
    /// A block without a direct `foreach` is a leaf: each time it finishes
    /// with a non-empty buffer, one variation is emitted. In a block with
    /// loops, a tile group is a prefix of the variations emitted by the loops
    /// after it and a suffix of those emitted by the loops before it, so every
    /// tile group of the block lands in every variation the block produces,
    /// in source order. Whatever the block added to the buffer is removed
    /// before returning. `position` locates the block for errors raised
    /// when it emits.
    ///
    /// # Errors
    /// Propagates any statement error, and returns
    /// [`EvalError::TooManyItems`] once the output exceeds
    /// [`EngineConfig::max_items`] variations.
    pub fn exec_body(&mut self, statements: &[Statement], position: Position) -> EvalResult<()> {
        let leaf = !statements.iter().any(Statement::is_loop);
        let mark = self.buffer.len();
        let first = self.variations.len();
        let mut looped = false;

        for statement in statements {
            match statement {
                Statement::Assignment { target,
                                        value,
                                        position, } => {
                    let value = self.eval_expr(value, Resolve::Strict)?;
                    self.bind(target, value, *position)?;
                },
                Statement::ForeachLoop { binding,
                                         source,
                                         body,
                                         position, } => {
                    self.eval_foreach(binding, source, body, *position)?;
                    looped = true;
                },
                Statement::FunctionCall { name,
                                          arguments,
                                          position, } => {
                    if let Value::Group(group) = self.eval_call(name, arguments, *position)?
                       && !group.is_empty()
                    {
                        if looped {
                            for variation in &mut self.variations[first..] {
                                variation.tiles.extend(group.tiles.iter().cloned());
                            }
                        }
                        self.buffer.extend(group.tiles);
                    }
                },
            }
        }

        if leaf && !self.buffer.is_empty() {
            self.emit(statements.last().map_or(position, Statement::position))?;
        }
        self.buffer.truncate(mark);

        Ok(())
    }

    fn emit(&mut self, position: Position) -> EvalResult<()> {
        let count = self.variations.len() + 1;
        ensure_items("variations", u128::try_from(count).unwrap_or(u128::MAX), &self.config, position)?;

        trace!(index = self.variations.len(),
               tiles = self.buffer.len(),
               "emitting variation");
        self.variations.push(Variation { tiles:       self.buffer.clone(),
                                         name:        self.name.clone(),
                                         description: self.description.clone(), });
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Tuple
    /// elements are always resolved with [`Resolve::Atom`]; `resolve`
    /// applies to a bare identifier.
    ///
    /// # Errors
    /// Returns an [`EvalError`] for unbound identifiers, unknown functions,
    /// type mismatches, overflow or excessive nesting.
    pub fn eval_expr(&mut self, expr: &Expr, resolve: Resolve) -> EvalResult<Value> {
        match expr {
            Expr::NumberLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expr::StringLiteral { value,
                                  quote: QuoteStyle::Double,
                                  .. } => Ok(Value::Text(value.clone())),
            Expr::StringLiteral { value,
                                  quote: QuoteStyle::Single,
                                  .. } => Ok(Value::Symbol(value.clone())),
            Expr::Identifier { name, position } => self.eval_identifier(name, *position, resolve),
            Expr::NumberRange { start,
                                end,
                                position, } => inclusive_range(*start, *end, &self.config, *position),
            Expr::Tuple { elements, position } => self.eval_tuple(elements, *position),
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => self.eval_call(name, arguments, *position),
            Expr::Index { target,
                          index,
                          position, } => self.eval_index(target, index, *position),
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => self.eval_binary_op(left, *op, right, *position),
        }
    }

    /// Evaluates the elements of a tuple literal into a list.
    ///
    /// Elements are evaluated in order with [`Resolve::Atom`], so
    /// `(b, c, d)` is a list of three symbols unless those names are bound.
    fn eval_tuple(&mut self, elements: &[Expr], position: Position) -> EvalResult<Value> {
        self.descend(position, |this| {
                elements.iter()
                        .map(|e| this.eval_expr(e, Resolve::Atom))
                        .collect::<EvalResult<Vec<_>>>()
                        .map(Value::from)
            })
    }

    /// Looks up a variable by name.
    ///
    /// Lookup walks the scope stack from the innermost frame outward. An
    /// unbound name evaluates to a symbol when `resolve` is
    /// [`Resolve::Atom`] and symbol atoms are enabled.
    ///
    /// # Errors
    /// Returns [`EvalError::UnboundIdentifier`] otherwise.
    pub fn eval_identifier(&self,
                           name: &str,
                           position: Position,
                           resolve: Resolve)
                           -> EvalResult<Value> {
        if let Some(value) = self.get_variable(name) {
            return Ok(value.clone());
        }
        if resolve == Resolve::Atom && self.config.symbol_atoms {
            return Ok(Value::Symbol(name.to_string()));
        }
        Err(EvalError::UnboundIdentifier { name: name.to_string(),
                                           position })
    }
}

fn text_entry(metadata: &Metadata, key: &str) -> Option<String> {
    metadata.get(key)
            .and_then(MetaValue::as_text)
            .map(str::to_string)
}
