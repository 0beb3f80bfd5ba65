//! Left-to-right compiler from search tokens to a [`SearchFilter`].

use sortinghat_api_rs::models::SearchFilter;

use super::date::DateExpression;
use super::error::{Field, FieldError, FieldResult};
use super::token::{classify_all, Keyword, Operator, SearchToken};

/// Compiler for search token sequences.
///
/// # Grammar
///
/// ```text
/// sequence    ::= clause*
/// clause      ::= "term" value
///               | "lastUpdated" comparison date
///               | "lastUpdated" "range" date ".." date
///               | value                         (implicit term)
/// comparison  ::= "<" | "<=" | ">" | ">="
/// date        ::= YYYY | YYYY-MM | YYYY-MM-DD
/// ```
///
/// Later clauses for the same field replace earlier ones. The first error
/// stops compilation.
///
/// # Example
///
/// ```
/// use sortinghat_search_rs::filter::FilterCompiler;
///
/// let filter = FilterCompiler::compile(&["term", "test", "lastUpdated", "<", "2000"]).unwrap();
/// assert_eq!(filter.term.as_deref(), Some("test"));
/// assert_eq!(filter.last_updated.as_deref(), Some("<2000-01-01T00:00:00.000Z"));
/// ```
pub struct FilterCompiler<'a> {
    tokens: Vec<SearchToken<'a>>,
    position: usize,
    filter: SearchFilter,
}

impl<'a> FilterCompiler<'a> {
    /// Compiles a token sequence into a filter.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] encountered. Compilation never panics
    /// and performs no I/O.
    pub fn compile<S: AsRef<str>>(tokens: &'a [S]) -> FieldResult<SearchFilter> {
        let mut compiler = Self {
            tokens: classify_all(tokens),
            position: 0,
            filter: SearchFilter::default(),
        };

        while let Some(token) = compiler.advance() {
            compiler.compile_clause(token)?;
        }

        tracing::debug!(filter = ?compiler.filter, "compiled search filter");
        Ok(compiler.filter)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<SearchToken<'a>> {
        let token = self.tokens.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn compile_clause(&mut self, token: SearchToken<'a>) -> FieldResult<()> {
        match token {
            SearchToken::Keyword(Keyword::Term) => {
                let value = self
                    .advance()
                    .ok_or(FieldError::MissingValue { field: Field::Term })?;
                self.set_term(value.text());
                Ok(())
            }
            SearchToken::Keyword(Keyword::LastUpdated) => self.compile_last_updated(),
            other => {
                self.set_term(other.text());
                Ok(())
            }
        }
    }

    /// Compiles `lastUpdated <operator> <value>`; the keyword is already consumed.
    fn compile_last_updated(&mut self) -> FieldResult<()> {
        let operator = match self.advance() {
            Some(SearchToken::Operator(op)) => op,
            other => {
                return Err(FieldError::InvalidOperator {
                    operator: other.map(|t| t.text().to_string()),
                })
            }
        };

        let raw = self
            .advance()
            .ok_or(FieldError::MissingValue {
                field: Field::LastUpdated,
            })?
            .text();

        let expression = match operator {
            Operator::Compare(comparison) => DateExpression::compare(comparison, raw)?,
            Operator::Range => DateExpression::range(raw)?,
        };

        self.filter.last_updated = Some(expression.to_string());
        Ok(())
    }

    fn set_term(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.filter.term = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}

/// Compiles search tokens into a filter. See [`FilterCompiler`].
pub fn compile_filter<S: AsRef<str>>(tokens: &[S]) -> FieldResult<SearchFilter> {
    FilterCompiler::compile(tokens)
}
