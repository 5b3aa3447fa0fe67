use std::{fmt, rc::Rc};

use crate::{
    ast::{MetaValue, Position},
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::tile_group::TileGroup},
};

/// Represents a runtime value in the interpreter.
///
/// Text and symbols differ in one respect: text (a double-quoted string or a
/// metadata string) iterates over its characters, while a symbol (a
/// single-quoted tile literal or a bare atom such as `b`) is a single
/// indivisible tile-code fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit integer, from a literal, a range or arithmetic.
    Integer(i64),
    /// A decimal, only produced by metadata.
    Real(f64),
    /// A string.
    Text(String),
    /// A tile-code fragment such as `b`, `RD` or `F`.
    Symbol(String),
    /// A boolean, only produced by metadata.
    Bool(bool),
    /// `null`, only produced by metadata.
    Null,
    /// An ordered list, from a tuple, a range or a builtin.
    List(Rc<Vec<Self>>),
    /// The result of a tile-group builtin used as a value.
    Group(TileGroup),
    /// A builtin function bound in the root scope, by name.
    Builtin(&'static str),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<&MetaValue> for Value {
    fn from(meta: &MetaValue) -> Self {
        match meta {
            MetaValue::Text(s) => Self::Text(s.clone()),
            MetaValue::Integer(n) => Self::Integer(*n),
            MetaValue::Real(r) => Self::Real(r.into_inner()),
            MetaValue::Bool(b) => Self::Bool(*b),
            MetaValue::Null => Self::Null,
            MetaValue::List(items) => items.iter().map(Self::from).collect::<Vec<_>>().into(),
        }
    }
}

impl Value {
    /// Name of the value's type, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Symbol(_) => "symbol",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::List(_) => "list",
            Self::Group(_) => "tile group",
            Self::Builtin(_) => "builtin function",
        }
    }

    /// Returns the integer, or a `TypeError` for any other type.
    pub fn as_integer(&self, position: Position) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(EvalError::TypeError { details: format!("expected an integer, found {}",
                                                                 other.type_name()),
                                                position }),
        }
    }

    /// Returns the list's elements, or a `TypeError` for any other type.
    pub fn as_list(&self, position: Position) -> EvalResult<&[Self]> {
        match self {
            Self::List(items) => Ok(items.as_slice()),
            other => Err(EvalError::TypeError { details: format!("expected a list, found {}",
                                                                 other.type_name()),
                                                position }),
        }
    }

    /// Renders the value as a piece of a tile code.
    ///
    /// Integers, decimals, text and symbols render as written; other types
    /// cannot be part of a tile code.
    ///
    /// # Example
    /// ```
    /// use mtl::{ast::Position, interpreter::value::core::Value};
    ///
    /// let at = Position::new(1, 1);
    /// assert_eq!(Value::Integer(3).tile_fragment(at).unwrap(), "3");
    /// assert_eq!(Value::Symbol("b".into()).tile_fragment(at).unwrap(), "b");
    /// assert!(Value::Null.tile_fragment(at).is_err());
    /// ```
    pub fn tile_fragment(&self, position: Position) -> EvalResult<String> {
        match self {
            Self::Integer(n) => Ok(n.to_string()),
            Self::Real(r) => Ok(r.to_string()),
            Self::Text(s) | Self::Symbol(s) => Ok(s.clone()),
            other => Err(EvalError::TypeError { details: format!("a {} cannot be part of a tile code",
                                                                 other.type_name()),
                                                position }),
        }
    }

    /// Returns the elements a `foreach` over this value visits, in order.
    ///
    /// Lists yield their elements, text yields one single-character text per
    /// code point, and a tile group yields its tile codes. Every other type
    /// is not iterable and yields `None`.
    #[must_use]
    pub fn elements(&self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items.to_vec()),
            Self::Text(s) => Some(s.chars().map(|c| Self::Text(c.to_string())).collect()),
            Self::Group(group) => Some(group.tiles.iter().cloned().map(Self::Symbol).collect()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) | Self::Symbol(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            },
            Self::Group(group) => write!(f, "{group}"),
            Self::Builtin(name) => write!(f, "<builtin {name}>"),
        }
    }
}
