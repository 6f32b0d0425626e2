//! Languages command handler - Supported language identifiers

use crate::commands::CommandContext;
use crate::error::Result;
use crate::lang::Lang;

/// Run the languages command
pub fn run_languages(ctx: &CommandContext) -> Result<String> {
    let mut output = String::new();
    for lang in Lang::ALL {
        output.push_str(&format!("{:<12}{}\n", lang.name(), lang.ids().join(", ")));
        if ctx.verbose {
            let comment = ctx.settings.comment_for(lang.grammar());
            output.push_str(&format!(
                "{:<12}{} {} {}\n",
                "",
                comment.open,
                comment.prefix.trim(),
                comment.close
            ));
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_language() {
        let output = run_languages(&CommandContext::default()).unwrap();
        assert_eq!(output.lines().count(), Lang::ALL.len());
        assert!(output.starts_with("c           c, h\n"));
        assert!(output.contains("typescript  typescript, ts, tsx, typescriptreact\n"));
    }
}
