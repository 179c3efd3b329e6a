use clap::Parser;
use std::path::PathBuf;

use crate::generator::GeneratorOptions;

/// Shape-driven example payload generator
#[derive(Parser, Debug, Clone)]
#[command(name = "eidolon", version, about, long_about = None)]
pub struct Cli {
    /// Path to the shape document (JSON or YAML)
    #[arg(short, long, env = "EIDOLON_DOCUMENT")]
    pub document: PathBuf,

    /// Name, display name, or id of the shape to render
    #[arg(short, long)]
    pub shape: Option<String>,

    /// Target mime type
    #[arg(short, long, env = "EIDOLON_MIME", default_value = "application/json")]
    pub mime: String,

    /// Prefer declared examples over default values
    #[arg(long)]
    pub examples: bool,

    /// Include optional properties
    #[arg(long)]
    pub optional: bool,

    /// Shape id to prefer when disambiguating a union (repeatable)
    #[arg(long = "union")]
    pub unions: Vec<String>,

    /// List the shapes in the document instead of rendering
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            render_examples: self.examples,
            render_optional: self.optional,
            selected_unions: self.unions.clone(),
            ..GeneratorOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["eidolon", "--document", "api.json"]);
        assert_eq!(cli.document, PathBuf::from("api.json"));
        assert_eq!(cli.mime, "application/json");
        assert!(cli.shape.is_none());
        assert!(!cli.examples);
        assert!(!cli.optional);
        assert!(cli.unions.is_empty());
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "eidolon",
            "--document",
            "shapes.yaml",
            "--shape",
            "User",
            "--mime",
            "application/xml",
            "--examples",
            "--optional",
            "--union",
            "#cat",
            "--union",
            "#dog",
        ]);
        assert_eq!(cli.document, PathBuf::from("shapes.yaml"));
        assert_eq!(cli.shape.as_deref(), Some("User"));
        assert_eq!(cli.mime, "application/xml");
        assert!(cli.examples);
        assert!(cli.optional);
        assert_eq!(cli.unions, vec!["#cat".to_string(), "#dog".to_string()]);
    }

    #[test]
    fn test_cli_options_mapping() {
        let cli = Cli::parse_from(["eidolon", "--document", "api.json", "--examples"]);
        let opts = cli.options();
        assert!(opts.render_examples);
        assert!(!opts.render_optional);
        assert!(opts.render_mocked);
    }
}
