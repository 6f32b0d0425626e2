//! Render command handler - Documentation comment for one declaration

use serde::Serialize;

use crate::cli::{RenderArgs, RenderFormat};
use crate::commands::{read_input, CommandContext};
use crate::config::Settings;
use crate::error::{DocblockError, Result};
use crate::render::render;
use crate::schema::Symbol;

/// JSON output of the render command
#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    language: &'static str,
    symbol: &'a Symbol,
    snippet: String,
    text: String,
    placeholders: usize,
}

/// Run the render command
pub fn run_render(args: &RenderArgs, ctx: &CommandContext) -> Result<String> {
    let (lang, line) = read_input(&args.input)?;
    let settings = apply_overrides(args, &ctx.settings);

    let symbol = crate::parse_line(lang, &line, &settings);
    let block = render(&symbol, lang.grammar(), &settings);

    let output = match args.format {
        RenderFormat::Snippet => block.snippet(),
        RenderFormat::Text => block.text(),
        RenderFormat::Json => {
            let report = RenderReport {
                language: lang.name(),
                symbol: &symbol,
                snippet: block.snippet(),
                text: block.text(),
                placeholders: block.placeholder_count(),
            };
            serde_json::to_string_pretty(&report).map_err(|e| DocblockError::Serialization {
                message: e.to_string(),
            })?
        }
    };

    Ok(format!("{}\n", output))
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(args: &RenderArgs, base: &Settings) -> Settings {
    let mut settings = base.clone();
    if let Some(spacing) = args.column_spacing {
        settings.column_spacing = spacing;
    }
    if let Some(style) = args.style {
        settings.comment_style = style.into();
    }
    if let Some(nullable) = args.nullable {
        settings.nullable_types = nullable.into();
    }
    if args.no_return_tag {
        settings.default_return_tag = false;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{InputArgs, NullableArg, StyleArg};
    use crate::config::{CommentStyle, NullablePolicy};

    fn args(line: &str, lang: &str) -> RenderArgs {
        RenderArgs {
            input: InputArgs {
                line: Some(line.to_string()),
                lang: Some(lang.to_string()),
                ..Default::default()
            },
            format: RenderFormat::Text,
            column_spacing: None,
            style: None,
            nullable: None,
            no_return_tag: false,
        }
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let base = Settings {
            column_spacing: 5,
            ..Default::default()
        };
        let mut render_args = args("let foo;", "js");
        render_args.style = Some(StyleArg::Alternate);
        render_args.nullable = Some(NullableArg::Mixed);
        render_args.no_return_tag = true;

        let settings = apply_overrides(&render_args, &base);
        assert_eq!(settings.column_spacing, 5);
        assert_eq!(settings.comment_style, CommentStyle::Alternate);
        assert_eq!(settings.nullable_types, NullablePolicy::Mixed);
        assert!(!settings.default_return_tag);
    }

    #[test]
    fn test_text_output() {
        let output =
            run_render(&args("let foo;", "javascript"), &CommandContext::default()).unwrap();
        assert_eq!(output, "/**\n * [foo description]\n */\n");
    }

    #[test]
    fn test_json_output() {
        let mut render_args = args("function foo($a) {", "php");
        render_args.format = RenderFormat::Json;
        let output = run_render(&render_args, &CommandContext::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["language"], "php");
        assert_eq!(json["symbol"]["name"], "foo");
        assert_eq!(json["placeholders"], 5);
        assert!(json["snippet"].as_str().unwrap().contains("${1:[foo description]}"));
    }
}
