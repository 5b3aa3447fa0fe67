use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// A location in template source.
///
/// Both coordinates are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Source line.
    pub line:   usize,
    /// Character offset within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A parsed template: its metadata record and the body of its `variations`
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Key/value pairs from the `metadata` block.
    pub metadata: Metadata,
    /// Statements of the `variations` block, in source order.
    pub body:     Vec<Statement>,
}

/// A scalar (or flat list) stored in the metadata block.
///
/// Serializes untagged, so `MetaValue::Integer(3)` becomes the JSON number `3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// A quoted string or bare identifier.
    Text(String),
    /// An integer literal.
    Integer(i64),
    /// A decimal literal.
    Real(OrderedFloat<f64>),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// A parenthesized or bracketed list.
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// Returns the text if this value is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// The metadata record of a template.
///
/// Keys keep the order they were written in; storing an existing key
/// replaces its value in place. Keys are not validated against any
/// whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Creates an empty metadata record.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Stores `value` under `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Distinguishes the two string literal forms.
///
/// Double-quoted strings are text; single-quoted strings are bare tile-code
/// literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
}

/// The names a value is bound to by an assignment or a loop header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A single name, such as `x`.
    Name(String),
    /// Several names bound positionally, such as `(a, b)` or `a, b`.
    Tuple(Vec<String>),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Tuple(names) => write!(f, "({})", names.join(", ")),
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant stores the position of its first token for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal, such as `7`.
    NumberLiteral {
        /// The value.
        value:    i64,
        /// Source position.
        position: Position,
    },
    /// A quoted literal; see [`QuoteStyle`].
    StringLiteral {
        /// The unescaped contents.
        value:    String,
        /// Which quotes were used.
        quote:    QuoteStyle,
        /// Source position.
        position: Position,
    },
    /// A variable reference, or a bare tile atom such as `b` or `F`.
    Identifier {
        /// The name as written.
        name:     String,
        /// Source position.
        position: Position,
    },
    /// An inclusive integer range, such as `1..9`.
    NumberRange {
        /// First value.
        start:    i64,
        /// Last value.
        end:      i64,
        /// Source position.
        position: Position,
    },
    /// A tuple or list literal, such as `(b, c, d)` or `[1, 2]`.
    Tuple {
        /// Element expressions in source order.
        elements: Vec<Expr>,
        /// Source position.
        position: Position,
    },
    /// A builtin used as a value, such as `complement(s, suits)`.
    FunctionCall {
        /// The called name.
        name:      String,
        /// Argument expressions in source order.
        arguments: Vec<Expr>,
        /// Source position.
        position:  Position,
    },
    /// Zero-based list indexing, such as `suits[0]`.
    Index {
        /// The indexed expression.
        target:   Box<Expr>,
        /// The index expression.
        index:    Box<Expr>,
        /// Source position.
        position: Position,
    },
    /// A binary operation, such as `n + 1`.
    BinaryOp {
        /// Left operand.
        left:     Box<Expr>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Expr>,
        /// Source position.
        position: Position,
    },
}

impl Expr {
    /// Returns the source position of the expression.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::NumberLiteral { position, .. }
            | Self::StringLiteral { position, .. }
            | Self::Identifier { position, .. }
            | Self::NumberRange { position, .. }
            | Self::Tuple { position, .. }
            | Self::FunctionCall { position, .. }
            | Self::Index { position, .. }
            | Self::BinaryOp { position, .. } => *position,
        }
    }

    /// Short human-readable description used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::NumberLiteral { value, .. } => format!("number {value}"),
            Self::StringLiteral { value, .. } => format!("string {value:?}"),
            Self::Identifier { name, .. } => format!("identifier '{name}'"),
            Self::NumberRange { start, end, .. } => format!("range {start}..{end}"),
            Self::Tuple { elements, .. } => format!("tuple of {} element(s)", elements.len()),
            Self::FunctionCall { name, .. } => format!("call to '{name}'"),
            Self::Index { .. } => "index expression".to_string(),
            Self::BinaryOp { op, .. } => format!("'{op}' expression"),
        }
    }
}

/// A statement inside a `variations` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = expr`, `(a, b) = expr` or `a, b = expr`.
    Assignment {
        /// The bound name or names.
        target:   Binding,
        /// The assigned expression.
        value:    Expr,
        /// Source position.
        position: Position,
    },
    /// `foreach x in source { ... }` or its colon form.
    ForeachLoop {
        /// The loop variable or variables.
        binding:  Binding,
        /// The iterated expression.
        source:   Expr,
        /// Statements run once per element.
        body:     Vec<Statement>,
        /// Source position.
        position: Position,
    },
    /// A call whose result is appended to the current variation, such as
    /// `pair(n, s)`.
    FunctionCall {
        /// The called name.
        name:      String,
        /// Argument expressions in source order.
        arguments: Vec<Expr>,
        /// Source position.
        position:  Position,
    },
}

impl Statement {
    /// Returns the source position of the statement.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Assignment { position, .. }
            | Self::ForeachLoop { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }

    /// Returns `true` for `foreach` loops.
    #[must_use]
    pub const fn is_loop(&self) -> bool {
        matches!(self, Self::ForeachLoop { .. })
    }
}

/// Binary operators supported in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`: integer addition or list concatenation.
    Add,
    /// `*`: integer multiplication.
    Mul,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("+"),
            Self::Mul => f.write_str("*"),
        }
    }
}
