use std::iter::Peekable;

use crate::{
    ast::{Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{Nesting, ParseResult},
            statement::parse_statement,
            utils::{eat, skip_newlines, skip_separators, unexpected},
        },
    },
};

/// Parses a loop or `variations` body in either of its two forms.
///
/// - Brace form: `{ statement* }`
/// - Colon form: `: statement* End`, where `End` may carry a trailing `:`.
///
/// A `:` immediately followed (possibly on the next line) by `{` is treated
/// as the brace form, which admits the legacy `variations: { ... }`. Both
/// forms produce the same statements.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `{` or `:`.
/// - `nest`: Nesting level of the body's statements.
/// - `expected`: Description used if neither form is present.
///
/// # Errors
/// Returns a `ParseError` if the body does not start with `{` or `:`, a
/// statement fails to parse, or a brace body is never closed.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>,
                         nest: Nesting,
                         expected: &str)
                         -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut lookahead = tokens.clone();
    skip_newlines(&mut lookahead);
    if let Some((Token::LBrace, _)) = lookahead.peek() {
        skip_newlines(tokens);
    }

    match tokens.next() {
        Some((Token::LBrace, position)) => parse_brace_block(tokens, *position, nest),
        Some((Token::Colon, _)) => {
            let mut lookahead = tokens.clone();
            skip_newlines(&mut lookahead);
            if let Some((Token::LBrace, position)) = lookahead.peek().copied() {
                skip_newlines(tokens);
                tokens.next();
                return parse_brace_block(tokens, *position, nest);
            }
            parse_colon_block(tokens, nest)
        },
        other => Err(unexpected(other, expected)),
    }
}

/// Parses statements up to the `}` matching the brace at `open`.
///
/// Grammar: `block := "{" (statement separator*)* "}"`
fn parse_brace_block<'a, I>(tokens: &mut Peekable<I>,
                            open: Position,
                            nest: Nesting)
                            -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut statements = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(statements);
            },
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: '{',
                                                           position:  open, });
            },
            Some(_) => statements.push(parse_statement(tokens, nest)?),
        }
    }
}

/// Parses statements up to `End`, or up to the enclosing `}` or end of
/// input, neither of which is consumed.
fn parse_colon_block<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut statements = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::End, _)) => {
                tokens.next();
                eat(tokens, |t| matches!(t, Token::Colon));
                return Ok(statements);
            },
            Some((Token::RBrace, _)) | None => return Ok(statements),
            Some(_) => statements.push(parse_statement(tokens, nest)?),
        }
    }
}
