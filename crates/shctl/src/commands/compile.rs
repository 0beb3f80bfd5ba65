//! Compile command implementation.
//!
//! Compiles search tokens locally and prints the filter that a search would
//! send. No request is made.

use sortinghat_search_rs::compile_filter;

use super::{CommandContext, Result};
use crate::output::{format_filter_json, format_filter_table};

/// Executes the compile command.
///
/// # Errors
///
/// Returns [`CommandError::Filter`](super::CommandError::Filter) if the
/// tokens do not compile.
pub fn execute(ctx: &CommandContext, tokens: &[String]) -> Result<()> {
    let filter = compile_filter(tokens)?;

    if ctx.json_output {
        println!("{}", format_filter_json(tokens, &filter)?);
    } else if !ctx.quiet {
        print!("{}", format_filter_table(&filter));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;

    fn ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            endpoint_override: None,
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compile_valid_tokens() {
        assert!(execute(&ctx(), &tokens(&["term", "john", "lastUpdated", ">", "2019"])).is_ok());
    }

    #[test]
    fn test_compile_error_is_filter_error() {
        let err = execute(&ctx(), &tokens(&["lastUpdated", "range", "2001..2000"])).unwrap_err();
        assert!(matches!(err, CommandError::Filter(_)));
    }
}
