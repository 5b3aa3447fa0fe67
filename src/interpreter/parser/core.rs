use std::iter::Peekable;

use crate::{
    ast::{Expr, Position, Program},
    config::DEFAULT_MAX_DEPTH,
    error::ParseError,
    interpreter::{
        lexer::Spanned,
        parser::{
            binary::parse_additive, metadata::parse_metadata_block,
            statement::parse_variations_block, utils::skip_separators,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Tracks how deeply blocks and expressions are nested.
///
/// Every recursive step that can nest (a loop body, a parenthesized group,
/// an argument list) asks for a deeper level first, so malicious or
/// accidental deep nesting ends in [`ParseError::NestingTooDeep`] instead of
/// exhausting the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nesting {
    depth: usize,
    limit: usize,
}

impl Nesting {
    /// Creates the outermost level with the given limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// Returns the next level, or an error if it would exceed the limit.
    pub fn deeper(self, position: Position) -> ParseResult<Self> {
        if self.depth >= self.limit {
            return Err(ParseError::NestingTooDeep { limit: self.limit,
                                                    position });
        }
        Ok(Self { depth: self.depth + 1,
                  limit: self.limit, })
    }
}

/// Parses a complete template with the default nesting limit.
///
/// Grammar: `program := metadata_block variations_block`
///
/// # Errors
/// Returns a [`ParseError`] if the metadata or variations block is missing
/// or malformed, or if tokens remain after the variations block.
///
/// # Example
/// ```
/// use mtl::{
///     ast::{MetaValue, Statement},
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let tokens = tokenize("metadata { name = \"Pairs\" }\nvariations { pair(1, b) }").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.metadata.get("name"), Some(&MetaValue::Text("Pairs".into())));
/// assert!(matches!(&program.body[0], Statement::FunctionCall { name, .. } if name == "pair"));
/// ```
pub fn parse(tokens: &[Spanned]) -> ParseResult<Program> {
    parse_with_limit(tokens, DEFAULT_MAX_DEPTH)
}

/// Parses a complete template, rejecting nesting deeper than `max_depth`.
///
/// # Errors
/// See [`parse`]; additionally returns [`ParseError::NestingTooDeep`] when
/// the limit is crossed.
pub fn parse_with_limit(tokens: &[Spanned], max_depth: usize) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let nest = Nesting::new(max_depth);

    skip_separators(&mut iter);
    let metadata = parse_metadata_block(&mut iter)?;
    skip_separators(&mut iter);
    let body = parse_variations_block(&mut iter, nest)?;
    skip_separators(&mut iter);

    if let Some((token, position)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { found:    token.to_string(),
                                                          position: *position, });
    }

    Ok(Program { metadata, body })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, addition, and descends through the precedence
/// hierarchy.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_additive(tokens, nest)
}
