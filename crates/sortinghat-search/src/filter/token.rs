//! Classification of raw search tokens.
//!
//! The search box hands over an ordered list of chips. Every chip is
//! classified before compilation so the compiler matches on variants instead
//! of comparing strings.

use std::fmt;

/// Keywords that introduce a filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `term`
    Term,
    /// `lastUpdated`
    LastUpdated,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Term => "term",
            Keyword::LastUpdated => "lastUpdated",
        }
    }
}

/// Single-bound date comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators accepted after `lastUpdated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Compare(Comparison),
    /// `range`
    Range,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Compare(c) => c.as_str(),
            Operator::Range => "range",
        }
    }
}

/// A classified search token.
///
/// Classification is context-free: `"<"` is always an operator and `"term"`
/// always a keyword. The compiler decides from position whether a token is
/// read as a value, using [`SearchToken::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchToken<'a> {
    Keyword(Keyword),
    Operator(Operator),
    Value(&'a str),
}

impl<'a> SearchToken<'a> {
    /// Classifies one raw token. Matching is exact and case-sensitive.
    pub fn classify(raw: &'a str) -> Self {
        match raw {
            "term" => SearchToken::Keyword(Keyword::Term),
            "lastUpdated" => SearchToken::Keyword(Keyword::LastUpdated),
            "<" => SearchToken::Operator(Operator::Compare(Comparison::Less)),
            "<=" => SearchToken::Operator(Operator::Compare(Comparison::LessOrEqual)),
            ">" => SearchToken::Operator(Operator::Compare(Comparison::Greater)),
            ">=" => SearchToken::Operator(Operator::Compare(Comparison::GreaterOrEqual)),
            "range" => SearchToken::Operator(Operator::Range),
            other => SearchToken::Value(other),
        }
    }

    /// The raw text of the token.
    pub fn text(&self) -> &'a str {
        match self {
            SearchToken::Keyword(k) => k.as_str(),
            SearchToken::Operator(op) => op.as_str(),
            SearchToken::Value(v) => v,
        }
    }
}

/// Classifies a whole token sequence, preserving order.
pub fn classify_all<S: AsRef<str>>(tokens: &[S]) -> Vec<SearchToken<'_>> {
    tokens
        .iter()
        .map(|t| {
            let token = SearchToken::classify(t.as_ref());
            tracing::trace!(raw = t.as_ref(), ?token, "classified token");
            token
        })
        .collect()
}
