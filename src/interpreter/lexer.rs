use std::fmt;

use logos::Logos;

use crate::{ast::Position, error::LexError};

/// A token paired with the position of its first character.
pub type Spanned = (Token, Position);

/// Represents a lexical token in template source.
///
/// Keywords and the `true`/`false`/`null` literals match without regard to
/// ASCII case; string contents keep their case. Comments and horizontal
/// whitespace are skipped, newlines are kept because they separate
/// statements.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// `metadata`
    #[token("metadata", ignore(case))]
    Metadata,
    /// `variations`
    #[token("variations", ignore(case))]
    Variations,
    /// `foreach`
    #[token("foreach", ignore(case))]
    Foreach,
    /// `in`
    #[token("in", ignore(case))]
    In,
    /// `end`, closing a colon-form body.
    #[token("end", ignore(case))]
    End,
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true, ignore(case))]
    #[token("false", |_| false, ignore(case))]
    Bool(bool),
    /// `null`
    #[token("null", ignore(case))]
    Null,
    /// Inclusive integer range tokens, such as `1..9`. Inverted bounds are
    /// kept as written.
    #[regex(r"[0-9]+\.\.[0-9]+", parse_range)]
    NumberRange((i64, i64)),
    /// Decimal literal tokens, such as `2.5`. Only meaningful in metadata.
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse().ok())]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    Integer(i64),
    /// Identifier tokens; variable names, builtin names and bare tile atoms
    /// such as `s1`, `kong` or `RD`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Double-quoted string tokens, with escapes resolved.
    #[regex(r#""([^"\\]|\\[\s\S])*""#, unquote)]
    Str(String),
    /// Single-quoted tile literal tokens, such as `'RD'`.
    #[regex(r"'([^'\\]|\\[\s\S])*'", unquote)]
    Tile(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `*`
    #[token("*")]
    Star,
    /// Line breaks.
    #[token("\n")]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => f.write_str("'metadata'"),
            Self::Variations => f.write_str("'variations'"),
            Self::Foreach => f.write_str("'foreach'"),
            Self::In => f.write_str("'in'"),
            Self::End => f.write_str("'end'"),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::Null => f.write_str("'null'"),
            Self::NumberRange((start, end)) => write!(f, "range {start}..{end}"),
            Self::Real(r) => write!(f, "number {r}"),
            Self::Integer(n) => write!(f, "number {n}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Tile(s) => write!(f, "tile '{s}'"),
            Self::Comment => f.write_str("comment"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::LBrace => f.write_str("'{'"),
            Self::RBrace => f.write_str("'}'"),
            Self::LBracket => f.write_str("'['"),
            Self::RBracket => f.write_str("']'"),
            Self::Comma => f.write_str("','"),
            Self::Colon => f.write_str("':'"),
            Self::Semicolon => f.write_str("';'"),
            Self::Equals => f.write_str("'='"),
            Self::Plus => f.write_str("'+'"),
            Self::Star => f.write_str("'*'"),
            Self::NewLine => f.write_str("end of line"),
            Self::Ignored => f.write_str("whitespace"),
        }
    }
}

/// Converts template source into a flat token stream.
///
/// Each token is paired with the 1-based line and column of its first
/// character. Lexing stops at the first malformed token.
///
/// # Errors
/// - [`LexError::UnterminatedString`] if a quote is never closed.
/// - [`LexError::LiteralTooLarge`] if an integer does not fit in `i64`.
/// - [`LexError::IllegalCharacter`] for any character that starts no token.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("foreach n in 1..9").unwrap();
/// assert_eq!(tokens[0], (Token::Foreach, Position::new(1, 1)));
/// assert_eq!(tokens[3], (Token::NumberRange((1, 9)), Position::new(1, 14)));
///
/// assert!(tokenize("pair('RD)").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    let lines = LineIndex::new(source);
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let position = lines.position(lexer.span().start);
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => return Err(classify_error(lexer.slice(), position)),
        }
    }

    Ok(tokens)
}

/// Decides which [`LexError`] a rejected slice represents.
fn classify_error(slice: &str, position: Position) -> LexError {
    match slice.chars().next() {
        Some('"' | '\'') => LexError::UnterminatedString { position },
        Some(c) if c.is_ascii_digit() => {
            let literal = slice.chars()
                               .take_while(|c| c.is_ascii_digit() || *c == '.')
                               .collect();
            LexError::LiteralTooLarge { literal, position }
        },
        Some(character) => LexError::IllegalCharacter { character, position },
        None => LexError::IllegalCharacter { character: '\0',
                                             position },
    }
}

/// Byte offsets of line starts, used to turn token offsets into positions.
struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let starts = std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1))
                                       .collect();
        Self { source, starts }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];
        let column = self.source[start..offset].chars().count() + 1;
        Position::new(line, column)
    }
}

/// Parses both bounds of a range literal such as `3..7`.
///
/// # Returns
/// - `Some((start, end))` if both bounds fit in `i64`.
/// - `None` otherwise, which surfaces as a lexing error.
fn parse_range(lex: &logos::Lexer<Token>) -> Option<(i64, i64)> {
    let (start, end) = lex.slice().split_once("..")?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

/// Strips the quotes from a string slice and resolves `\<char>` escapes to
/// the escaped character.
fn unquote(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
