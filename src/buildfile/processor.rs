//! Processing API for BUILD files
//!
//! Runs a source through a stage (token or ast) and renders the result in
//! one of the output formats. Format strings are `<stage>-<format>`:
//!
//! | format string   | output |
//! |-----------------|--------|
//! | `token-simple`  | one `<category:text>` token per line |
//! | `token-json`    | the token list as JSON |
//! | `ast-json`      | the parsed tree as JSON |
//! | `ast-canonical` | the canonical rendering of the whole file |
//! | `ast-loads`     | the canonical load block only |
//!
//! # Sample Sources
//!
//! The [`samples`] module gives tests access to the BUILD files under
//! `docs/samples`:
//!
//! ```rust,ignore
//! use buildfile::buildfile::processor::samples::BuildSources;
//!
//! let content = BuildSources::get_string("010-ts-library.BUILD")?;
//! let json = BuildSources::get_processed("030-select.BUILD", "ast-json")?;
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use crate::buildfile::config::BuildfileConfig;
use crate::buildfile::error::Error;
use crate::buildfile::lexer::{lex, Token};
use crate::buildfile::parser::ParseOptions;
use crate::buildfile::printer::{self, PrintOptions, PrintScope};

/// What the source is turned into before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// How the stage output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Canonical,
    Loads,
}

/// A stage together with a format valid for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingStage {
    fn name(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Canonical => "canonical",
            OutputFormat::Loads => "loads",
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like `token-simple` or `ast-canonical`
    pub fn from_string(format_str: &str) -> Result<Self, Error> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| Error::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(Error::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "canonical" => OutputFormat::Canonical,
            "loads" => OutputFormat::Loads,
            _ => return Err(Error::InvalidFormat(format_str.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(Error::UnsupportedFormat {
                stage: stage.name().to_string(),
                format: format.name().to_string(),
            });
        }
        Ok(spec)
    }

    /// Every valid stage/format pair
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Canonical),
            (ProcessingStage::Ast, OutputFormat::Loads),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage.name(), self.format.name())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::to_string)
        .collect()
}

/// Process source text according to `spec`
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &BuildfileConfig,
) -> Result<String, Error> {
    log::debug!("processing {} bytes as {}", source.len(), spec);
    match spec.stage {
        ProcessingStage::Token => {
            let tokens: Vec<Token> = lex(source)?.into_iter().map(|(token, _)| token).collect();
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let options = ParseOptions::from(&config.parser);
            let file = crate::buildfile::parse_with(source, &options)?;
            match spec.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&file)?),
                OutputFormat::Canonical => {
                    let options = PrintOptions {
                        scope: PrintScope::All,
                        ..PrintOptions::from(&config.printer)
                    };
                    Ok(printer::print(&file, &options))
                }
                OutputFormat::Loads => Ok(printer::print_loads(&file)),
                OutputFormat::Simple => Err(unsupported(spec)),
            }
        }
    }
}

/// Read a file and process it according to `spec`
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &BuildfileConfig,
) -> Result<String, Error> {
    let content = fs::read_to_string(file_path.as_ref())?;
    process_source(&content, spec, config)
}

fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&simple_token(token));
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        other => Err(unsupported(&ProcessingSpec {
            stage: ProcessingStage::Token,
            format: other,
        })),
    }
}

/// `<category>` for punctuation and keywords, `<category:text>` for the rest
fn simple_token(token: &Token) -> String {
    match token {
        Token::Str(text) | Token::Number(text) | Token::Ident(text) => {
            format!("<{}:{}>", token.category(), text)
        }
        Token::True | Token::False => format!("<{}:{}>", token.category(), token),
        _ => format!("<{}>", token.category()),
    }
}

fn unsupported(spec: &ProcessingSpec) -> Error {
    Error::UnsupportedFormat {
        stage: spec.stage.name().to_string(),
        format: spec.format.name().to_string(),
    }
}

/// Sample sources module for accessing the BUILD files under `docs/samples`
pub mod samples {
    use super::*;

    /// Available sample files
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "000-loads.BUILD",
        "010-ts-library.BUILD",
        "020-container-bundle-dict.BUILD",
        "030-select.BUILD",
        "040-package.BUILD",
    ];

    /// Main interface for accessing sample files
    pub struct BuildSources;

    impl BuildSources {
        fn sample_path(filename: &str) -> String {
            format!("{}/docs/samples/{}", env!("CARGO_MANIFEST_DIR"), filename)
        }

        fn validate_sample(filename: &str) -> Result<(), Error> {
            if AVAILABLE_SAMPLES.contains(&filename) {
                Ok(())
            } else {
                Err(Error::UnknownSample(filename.to_string()))
            }
        }

        /// Raw sample content
        pub fn get_string(filename: &str) -> Result<String, Error> {
            Self::validate_sample(filename)?;
            Ok(fs::read_to_string(Self::sample_path(filename))?)
        }

        /// Sample content processed with a format string, using default config
        pub fn get_processed(filename: &str, format: &str) -> Result<String, Error> {
            Self::validate_sample(filename)?;
            let spec = ProcessingSpec::from_string(format)?;
            let config = crate::buildfile::config::load_defaults()?;
            process_file(Self::sample_path(filename), &spec, &config)
        }

        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }

}
