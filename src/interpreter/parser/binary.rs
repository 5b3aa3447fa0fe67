use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{Nesting, ParseResult},
            primary::parse_postfix,
        },
    },
};

/// Parses addition expressions.
///
/// Handles the left-associative `+` operator. Each operator nests the tree
/// one level deeper, so long chains count toward the nesting limit.
///
/// The rule is: `additive := multiplicative ("+" multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `nest`: Current nesting level.
///
/// # Returns
/// An `Expr::BinaryOp` tree, or the single operand if no `+` follows it.
///
/// # Errors
/// Returns `NestingTooDeep` if the chain is longer than the nesting limit.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_multiplicative(tokens, nest)?;
    let mut nest = nest;
    while let Some((Token::Plus, position)) = tokens.peek().copied() {
        tokens.next();
        nest = nest.deeper(*position)?;
        let right = parse_multiplicative(tokens, nest)?;
        left = Expr::BinaryOp { left:     Box::new(left),
                                op:       BinaryOperator::Add,
                                right:    Box::new(right),
                                position: *position, };
    }
    Ok(left)
}

/// Parses multiplication expressions.
///
/// The rule is: `multiplicative := postfix ("*" postfix)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, nest: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_postfix(tokens, nest)?;
    let mut nest = nest;
    while let Some((Token::Star, position)) = tokens.peek().copied() {
        tokens.next();
        nest = nest.deeper(*position)?;
        let right = parse_postfix(tokens, nest)?;
        left = Expr::BinaryOp { left:     Box::new(left),
                                op:       BinaryOperator::Mul,
                                right:    Box::new(right),
                                position: *position, };
    }
    Ok(left)
}
