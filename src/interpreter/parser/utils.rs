use std::iter::Peekable;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::core::{Nesting, ParseResult},
    },
};

/// Builds the error for a token that is not the one expected.
pub(in crate::interpreter::parser) fn unexpected(next: Option<&Spanned>,
                                                 expected: &str)
                                                 -> ParseError {
    match next {
        Some((token, position)) => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                                 found:    token.to_string(),
                                                                 position: *position, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string() },
    }
}

/// Consumes the next token if it equals `expected`, returning its position.
///
/// # Errors
/// Returns `UnexpectedToken` (or `UnexpectedEndOfInput`) naming
/// `description` when the next token differs.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((token, position)) if token == expected => Ok(*position),
        other => Err(unexpected(other, description)),
    }
}

/// Consumes the next token if it matches `predicate`.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>,
                                                 predicate: impl Fn(&Token) -> bool)
                                                 -> bool
    where I: Iterator<Item = &'a Spanned>
{
    if tokens.peek().is_some_and(|(token, _)| predicate(token)) {
        tokens.next();
        return true;
    }
    false
}

/// Skips line breaks.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Spanned>
{
    while eat(tokens, |t| matches!(t, Token::NewLine)) {}
}

/// Skips statement separators: line breaks and `;`.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Spanned>
{
    while eat(tokens, |t| matches!(t, Token::NewLine | Token::Semicolon)) {}
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by tuple literals, argument lists and tuple
/// bindings. Line breaks between items are ignored, so lists may span
/// several lines. An immediately encountered closing token produces an
/// empty list.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening delimiter.
/// - `nest`: Nesting level of the list's items.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `opened`: The opening delimiter and its position, for error reporting.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an item is followed by something other than `,` or `closing`,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    nest: Nesting,
    parse_item: impl Fn(&mut Peekable<I>, Nesting) -> ParseResult<T>,
    closing: &Token,
    opened: (char, Position))
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let unclosed = || ParseError::UnclosedDelimiter { delimiter: opened.0,
                                                      position:  opened.1, };
    let mut items = Vec::new();
    loop {
        skip_newlines(tokens);
        match tokens.peek() {
            Some((token, _)) if token == closing => {
                tokens.next();
                return Ok(items);
            },
            None => return Err(unclosed()),
            Some(_) => {},
        }

        items.push(parse_item(tokens, nest)?);

        skip_newlines(tokens);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if token == closing => {
                tokens.next();
                return Ok(items);
            },
            Some((token, position)) => {
                return Err(ParseError::UnexpectedToken { expected: format!("',' or {closing}"),
                                                         found:    token.to_string(),
                                                         position: *position, });
            },
            None => return Err(unclosed()),
        }
    }
}

/// Parses a plain identifier and returns its name and position.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(name), position)) => Ok((name.clone(), *position)),
        other => Err(unexpected(other, "identifier")),
    }
}
