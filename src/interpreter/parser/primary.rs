use std::iter::Peekable;

use crate::{
    ast::{Expr, Position, QuoteStyle},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{Nesting, ParseResult, parse_expression},
            utils::{parse_comma_separated, skip_newlines, unexpected},
        },
    },
};

/// Parses a primary expression followed by any number of `[index]`
/// suffixes.
///
/// Grammar: `postfix := primary ("[" expression "]")*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut expr = parse_primary(tokens, nest)?;

    while let Some((Token::LBracket, open)) = tokens.peek().copied() {
        tokens.next();
        let inner = nest.deeper(*open)?;
        skip_newlines(tokens);
        let index = parse_expression(tokens, inner)?;
        skip_newlines(tokens);
        match tokens.next() {
            Some((Token::RBracket, _)) => {},
            None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: '[',
                                                           position:  *open, });
            },
            other => return Err(unexpected(other, "']'")),
        }
        expr = Expr::Index { target:   Box::new(expr),
                             index:    Box::new(index),
                             position: *open, };
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// Primary expressions are the atoms of the expression grammar:
/// - integer literals and ranges (`7`, `1..9`),
/// - quoted strings (`"text"`) and tile literals (`'RD'`),
/// - identifiers and calls (`suits`, `complement(s, suits)`),
/// - tuples (`(b, c, d)`, `[1, 2]`, `()`) and grouping (`(n + 1)`).
///
/// # Errors
/// Returns a `ParseError` for any other token, an unclosed delimiter, or
/// nesting beyond the limit.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.next() {
        Some((Token::Integer(value), position)) => Ok(Expr::NumberLiteral { value:    *value,
                                                                            position: *position, }),
        Some((Token::NumberRange((start, end)), position)) => {
            Ok(Expr::NumberRange { start:    *start,
                                   end:      *end,
                                   position: *position, })
        },
        Some((Token::Str(value), position)) => Ok(Expr::StringLiteral { value:    value.clone(),
                                                                        quote:    QuoteStyle::Double,
                                                                        position: *position, }),
        Some((Token::Tile(value), position)) => Ok(Expr::StringLiteral { value:    value.clone(),
                                                                         quote:    QuoteStyle::Single,
                                                                         position: *position, }),
        Some((Token::Identifier(name), position)) => {
            parse_identifier_or_call(tokens, name, *position, nest)
        },
        Some((Token::LParen, position)) => parse_parenthesized(tokens, *position, nest),
        Some((Token::LBracket, position)) => {
            let elements = parse_comma_separated(tokens,
                                                 nest.deeper(*position)?,
                                                 parse_expression,
                                                 &Token::RBracket,
                                                 ('[', *position))?;
            Ok(Expr::Tuple { elements,
                             position: *position })
        },
        other => Err(unexpected(other, "expression")),
    }
}

/// Parses either a plain identifier or a call, depending on whether `(`
/// follows the name directly.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   position: Position,
                                   nest: Nesting)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if let Some((Token::LParen, open)) = tokens.peek().copied() {
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              nest.deeper(*open)?,
                                              parse_expression,
                                              &Token::RParen,
                                              ('(', *open))?;
        return Ok(Expr::FunctionCall { name: name.to_string(),
                                       arguments,
                                       position });
    }

    Ok(Expr::Identifier { name: name.to_string(),
                          position })
}

/// Parses what follows a `(` in expression position.
///
/// `()` is the empty tuple, `(e)` is grouping, and `(e, ...)` is a tuple;
/// a trailing comma makes a one-element tuple.
fn parse_parenthesized<'a, I>(tokens: &mut Peekable<I>,
                              open: Position,
                              nest: Nesting)
                              -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let inner = nest.deeper(open)?;
    skip_newlines(tokens);

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Tuple { elements: Vec::new(),
                                position: open, });
    }

    let first = parse_expression(tokens, inner)?;
    skip_newlines(tokens);

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(first),
        Some((Token::Comma, _)) => {
            let mut elements = vec![first];
            elements.extend(parse_comma_separated(tokens,
                                                  inner,
                                                  parse_expression,
                                                  &Token::RParen,
                                                  ('(', open))?);
            Ok(Expr::Tuple { elements,
                             position: open })
        },
        None => Err(ParseError::UnclosedDelimiter { delimiter: '(',
                                                    position:  open, }),
        other => Err(unexpected(other, "',' or ')'")),
    }
}
