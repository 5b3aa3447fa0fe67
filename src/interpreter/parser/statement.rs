use std::iter::Peekable;

use crate::{
    ast::{Binding, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            block::parse_body,
            core::{Nesting, ParseResult, parse_expression},
            utils::{eat, expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
};

/// Parses the `variations` block that follows the metadata.
///
/// Accepts `variations { ... }`, `variations = { ... }`, `variations: { ... }`
/// and the colon form `variations: ... End`.
///
/// # Errors
/// Returns `MissingVariations` if the keyword is absent, or any error from
/// parsing the body.
pub fn parse_variations_block<'a, I>(tokens: &mut Peekable<I>,
                                     nest: Nesting)
                                     -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.next() {
        Some((Token::Variations, _)) => {},
        Some((token, position)) => {
            return Err(ParseError::MissingVariations { found:    token.to_string(),
                                                       position: *position, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected: "'variations' block".into() });
        },
    }
    eat(tokens, |t| matches!(t, Token::Equals));

    parse_body(tokens, nest, "'{' or ':' after 'variations'")
}

/// Parses a single statement.
///
/// The leading token decides the form:
/// - `foreach` starts a loop,
/// - `(` starts a tuple binding such as `(s2, s3) = ...`,
/// - an identifier followed by `=` is an assignment, followed by `,` a bare
///   tuple binding such as `y, z = ...`, and followed by `(` a call.
///
/// Statement order is never changed by the parser.
///
/// # Errors
/// Returns `ExpectedStatement` for any other leading token, or the error of
/// the construct being parsed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let Some((token, position)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "statement".into() });
    };
    let position = *position;

    match token {
        Token::Foreach => {
            tokens.next();
            parse_foreach(tokens, position, nest)
        },
        Token::LParen => {
            tokens.next();
            let names = parse_parenthesized_names(tokens, position)?;
            parse_assignment_value(tokens, Binding::Tuple(names), position, nest)
        },
        Token::Identifier(name) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek().copied() {
                Some((Token::Equals, _)) => {
                    tokens.next();
                    parse_assignment_value(tokens, Binding::Name(name.clone()), position, nest)
                },
                Some((Token::Comma, _)) => {
                    let names = parse_bare_names(tokens)?;
                    parse_assignment_value(tokens, Binding::Tuple(names), position, nest)
                },
                Some((Token::LParen, open)) => {
                    tokens.next();
                    tokens.next();
                    let arguments = parse_comma_separated(tokens,
                                                          nest.deeper(*open)?,
                                                          parse_expression,
                                                          &Token::RParen,
                                                          ('(', *open))?;
                    Ok(Statement::FunctionCall { name: name.clone(),
                                                 arguments,
                                                 position })
                },
                other => Err(unexpected(other, "'=', ',' or '(' after identifier")),
            }
        },
        other => Err(ParseError::ExpectedStatement { found: other.to_string(),
                                                     position }),
    }
}

/// Parses the `= expression` tail of an assignment.
fn parse_assignment_value<'a, I>(tokens: &mut Peekable<I>,
                                 target: Binding,
                                 position: Position,
                                 nest: Nesting)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::Equals, "'='")?;
    let value = parse_expression(tokens, nest)?;

    Ok(Statement::Assignment { target,
                               value,
                               position })
}

/// Parses a `foreach` loop after its keyword.
///
/// Accepted headers:
/// ```text
/// foreach (x in source)        foreach x in source
/// foreach ((a, b) in source)   foreach (a, b) in source
/// ```
/// followed by a brace or colon body (see [`parse_body`]).
///
/// # Errors
/// - `MissingIn` if the header has no `in` clause.
/// - `UnclosedDelimiter` if the header's `(` is never closed.
/// - `NestingTooDeep` if the body would exceed the nesting limit.
fn parse_foreach<'a, I>(tokens: &mut Peekable<I>,
                        position: Position,
                        nest: Nesting)
                        -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let body_nest = nest.deeper(position)?;
    let (binding, wrapped) = parse_loop_binding(tokens)?;

    match tokens.next() {
        Some((Token::In, _)) => {},
        Some((token, position)) => {
            return Err(ParseError::MissingIn { found:    token.to_string(),
                                               position: *position, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { expected: "'in'".into() }),
    }

    let source = parse_expression(tokens, nest)?;

    if let Some(open) = wrapped {
        match tokens.next() {
            Some((Token::RParen, _)) => {},
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: '(',
                                                           position:  open, });
            },
            other => return Err(unexpected(other, "')' closing the foreach header")),
        }
    }

    let body = parse_body(tokens, body_nest, "'{' or ':' after foreach header")?;

    Ok(Statement::ForeachLoop { binding,
                                source,
                                body,
                                position })
}

/// Parses the loop variable(s) of a `foreach` header.
///
/// Returns the binding and, when the whole header is wrapped in
/// parentheses, the position of the opening `(`.
fn parse_loop_binding<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Binding, Option<Position>)>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let Some((Token::LParen, open)) = tokens.peek().copied() else {
        let names = parse_bare_names(tokens)?;
        return Ok((into_binding(names), None));
    };
    let open = *open;
    tokens.next();

    if let Some((Token::LParen, inner)) = tokens.peek().copied() {
        tokens.next();
        let names = parse_parenthesized_names(tokens, *inner)?;
        return Ok((Binding::Tuple(names), Some(open)));
    }

    let (first, _) = parse_identifier(tokens)?;
    if let Some((Token::Comma, _)) = tokens.peek() {
        let mut names = vec![first];
        while eat(tokens, |t| matches!(t, Token::Comma)) {
            names.push(parse_identifier(tokens)?.0);
        }
        match tokens.next() {
            Some((Token::RParen, _)) => {},
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: '(',
                                                           position:  open, });
            },
            other => return Err(unexpected(other, "',' or ')'")),
        }
        return Ok((Binding::Tuple(names), None));
    }

    Ok((Binding::Name(first), Some(open)))
}

fn into_binding(mut names: Vec<String>) -> Binding {
    if names.len() == 1
       && let Some(name) = names.pop()
    {
        return Binding::Name(name);
    }
    Binding::Tuple(names)
}

/// Parses `a, b, c` without surrounding parentheses.
fn parse_bare_names<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a Spanned>
{
    let mut names = vec![parse_identifier(tokens)?.0];
    while eat(tokens, |t| matches!(t, Token::Comma)) {
        names.push(parse_identifier(tokens)?.0);
    }
    Ok(names)
}

/// Parses the names of a parenthesized binding after its `(`.
fn parse_parenthesized_names<'a, I>(tokens: &mut Peekable<I>,
                                    open: Position)
                                    -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_comma_separated(tokens,
                          Nesting::new(1),
                          |tokens, _| parse_identifier(tokens).map(|(name, _)| name),
                          &Token::RParen,
                          ('(', open))
}
