//! Parse command handler - Symbol record as JSON

use crate::cli::ParseArgs;
use crate::commands::{read_input, CommandContext};
use crate::error::{DocblockError, Result};

/// Run the parse command
pub fn run_parse(args: &ParseArgs, ctx: &CommandContext) -> Result<String> {
    let (lang, line) = read_input(&args.input)?;
    let mut settings = ctx.settings.clone();
    if let Some(nullable) = args.nullable {
        settings.nullable_types = nullable.into();
    }

    let symbol = crate::parse_line(lang, &line, &settings);
    let json = if args.compact {
        serde_json::to_string(&symbol)
    } else {
        serde_json::to_string_pretty(&symbol)
    }
    .map_err(|e| DocblockError::Serialization {
        message: e.to_string(),
    })?;

    Ok(format!("{}\n", json))
}
