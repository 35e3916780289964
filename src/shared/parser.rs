//! Tiny parser combinators over `&str`.
//!
//! A parser is any function from the input to `Some((value, remaining))` on
//! success or `None` on failure. Parsers hold no state, so the same parser
//! value can be shared between threads and applied to many inputs.
//!
//! ```rust
//! use swarm_tracker::shared::parser::{alt, exactly, matching, tag, Parser};
//!
//! let hex_pair = exactly(2, matching(|c: char| c.is_ascii_hexdigit()));
//!
//! assert_eq!(hex_pair.parse("e1rest"), Some((vec!['e', '1'], "rest")));
//! assert_eq!(alt(tag("a"), tag("b")).parse("bc"), Some(("b", "c")));
//! ```

/// The outcome of applying a parser: the parsed value and the remaining input.
pub type ParseResult<'a, T> = Option<(T, &'a str)>;

pub trait Parser<'a, T> {
    fn parse(&self, input: &'a str) -> ParseResult<'a, T>;
}

impl<'a, T, F> Parser<'a, T> for F
where
    F: Fn(&'a str) -> ParseResult<'a, T>,
{
    fn parse(&self, input: &'a str) -> ParseResult<'a, T> {
        self(input)
    }
}

/// Matches and consumes an exact literal.
#[must_use]
pub fn tag<'a>(literal: &'static str) -> impl Parser<'a, &'a str> {
    move |input: &'a str| input.strip_prefix(literal).map(|rest| (&input[..literal.len()], rest))
}

/// Consumes exactly one character satisfying the predicate.
#[must_use]
pub fn matching<'a, P>(predicate: P) -> impl Parser<'a, char>
where
    P: Fn(char) -> bool,
{
    move |input: &'a str| {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if predicate(c) => Some((c, chars.as_str())),
            _ => None,
        }
    }
}

/// Runs `first` and then `second` over what `first` left.
#[must_use]
pub fn sequence<'a, A, B, P1, P2>(first: P1, second: P2) -> impl Parser<'a, (A, B)>
where
    P1: Parser<'a, A>,
    P2: Parser<'a, B>,
{
    move |input: &'a str| {
        let (a, rest) = first.parse(input)?;
        let (b, rest) = second.parse(rest)?;
        Some(((a, b), rest))
    }
}

/// Tries `first`, falling back to `second` on the original input.
#[must_use]
pub fn alt<'a, T, P1, P2>(first: P1, second: P2) -> impl Parser<'a, T>
where
    P1: Parser<'a, T>,
    P2: Parser<'a, T>,
{
    move |input: &'a str| first.parse(input).or_else(|| second.parse(input))
}

/// Applies `parser` zero or more times. It never fails.
#[must_use]
pub fn repeat<'a, T, P>(parser: P) -> impl Parser<'a, Vec<T>>
where
    P: Parser<'a, T>,
{
    move |input: &'a str| {
        let mut values = Vec::new();
        let mut remaining = input;

        while let Some((value, rest)) = parser.parse(remaining) {
            values.push(value);
            if rest.len() == remaining.len() {
                break;
            }
            remaining = rest;
        }

        Some((values, remaining))
    }
}

/// Requires exactly `count` consecutive successes of `parser`.
#[must_use]
pub fn exactly<'a, T, P>(count: usize, parser: P) -> impl Parser<'a, Vec<T>>
where
    P: Parser<'a, T>,
{
    move |input: &'a str| {
        let mut values = Vec::with_capacity(count);
        let mut remaining = input;

        for _ in 0..count {
            let (value, rest) = parser.parse(remaining)?;
            values.push(value);
            remaining = rest;
        }

        Some((values, remaining))
    }
}

/// Transforms the value produced by `parser`.
#[must_use]
pub fn map<'a, A, B, P, F>(parser: P, f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: Fn(A) -> B,
{
    move |input: &'a str| parser.parse(input).map(|(value, rest)| (f(value), rest))
}
