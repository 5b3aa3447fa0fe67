use std::iter::Peekable;

use ordered_float::OrderedFloat;

use crate::{
    ast::{MetaValue, Metadata, Position},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::ParseResult,
            utils::{eat, expect, skip_newlines, unexpected},
        },
    },
};

/// Parses the `metadata` block that opens a template.
///
/// Both `metadata { ... }` and the legacy `metadata = { ... }` are accepted.
/// Entries are `key = value`, `key: value` or `key value`, separated by line
/// breaks, commas or semicolons. Keys are identifiers or quoted strings and
/// are stored verbatim.
///
/// Grammar:
/// ```text
/// metadata_block := "metadata" "="? "{" (entry separator*)* "}"
/// entry          := key ("=" | ":")? value
/// ```
///
/// # Errors
/// - `MissingMetadata` if the block does not start with `metadata`.
/// - `UnclosedDelimiter` if the closing `}` is missing.
/// - `UnexpectedToken` for a malformed key or value.
pub fn parse_metadata_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Metadata>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.next() {
        Some((Token::Metadata, _)) => {},
        Some((token, position)) => {
            return Err(ParseError::MissingMetadata { found:    token.to_string(),
                                                     position: *position, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected: "'metadata' block".into() });
        },
    }
    eat(tokens, |t| matches!(t, Token::Equals | Token::Colon));
    skip_newlines(tokens);
    let open = expect(tokens, &Token::LBrace, "'{' after 'metadata'")?;

    let mut metadata = Metadata::new();
    loop {
        while eat(tokens, |t| matches!(t, Token::NewLine | Token::Comma | Token::Semicolon)) {}

        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(metadata);
            },
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: '{',
                                                           position:  open, });
            },
            Some(_) => {},
        }

        let key = parse_key(tokens)?;
        eat(tokens, |t| matches!(t, Token::Equals | Token::Colon));
        let value = parse_value(tokens)?;
        metadata.insert(key, value);
    }
}

fn parse_key<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(key) | Token::Str(key) | Token::Tile(key), _)) => Ok(key.clone()),
        other => Err(unexpected(other, "metadata key")),
    }
}

/// Parses one metadata value.
///
/// A bare identifier is stored as text, so `category pairs` and
/// `category = "pairs"` are equivalent.
fn parse_value<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<MetaValue>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::LParen, position)) => parse_list(tokens, &Token::RParen, ('(', *position)),
        Some((Token::LBracket, position)) => parse_list(tokens, &Token::RBracket, ('[', *position)),
        other => scalar(other),
    }
}

fn scalar(next: Option<&Spanned>) -> ParseResult<MetaValue> {
    match next {
        Some((Token::Str(s) | Token::Tile(s) | Token::Identifier(s), _)) => {
            Ok(MetaValue::Text(s.clone()))
        },
        Some((Token::Integer(n), _)) => Ok(MetaValue::Integer(*n)),
        Some((Token::Real(r), _)) => Ok(MetaValue::Real(OrderedFloat(*r))),
        Some((Token::Bool(b), _)) => Ok(MetaValue::Bool(*b)),
        Some((Token::Null, _)) => Ok(MetaValue::Null),
        other => Err(unexpected(other, "metadata value")),
    }
}

/// Parses the items of a metadata list up to `closing`. Items are scalars
/// separated by commas or line breaks.
fn parse_list<'a, I>(tokens: &mut Peekable<I>,
                     closing: &Token,
                     opened: (char, Position))
                     -> ParseResult<MetaValue>
    where I: Iterator<Item = &'a Spanned>
{
    let mut items = Vec::new();
    loop {
        while eat(tokens, |t| matches!(t, Token::NewLine | Token::Comma)) {}
        match tokens.next() {
            Some((token, _)) if token == closing => return Ok(MetaValue::List(items)),
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: opened.0,
                                                           position:  opened.1, });
            },
            other => items.push(scalar(other)?),
        }
    }
}
