//! Shared output formatting for tdl CLI commands.
//!
//! Every command emits either a human-readable block or, with `--json`, a
//! versioned envelope so scripts can rely on a stable shape across releases.

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "tdl.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable command output: a header line, optional key-value summary
/// lines, free-form detail lines, and warnings.
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    fn render(&self) -> String {
        let mut lines = vec![self.header.clone()];

        if !self.summary.is_empty() {
            lines.push(String::new());
            lines.push("Summary:".to_string());
            for (key, value) in &self.summary {
                if value.is_empty() {
                    lines.push(format!("- {key}"));
                } else {
                    lines.push(format!("- {key}: {value}"));
                }
            }
        }

        for (title, items) in [("Details", &self.details), ("Warnings", &self.warnings)] {
            if items.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{title}:"));
            for item in items {
                lines.push(format!("- {item}"));
            }
        }

        lines.join("\n")
    }
}

/// The JSON success envelope
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    data: &'a T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// The JSON error envelope
#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    error: ErrorBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings: human.map(|h| h.warnings.clone()).unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else if !options.quiet {
        if let Some(human) = human {
            println!("{}", human.render());
        }
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);

    if json {
        let envelope = ErrorEnvelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            },
            next_steps,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Best-effort command name for error envelopes, read from the raw args
/// because errors can fire before clap finishes parsing.
pub fn infer_command_name_from_args() -> String {
    let mut positional = std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with('-'));

    let Some(command) = positional.next() else {
        return "tdl".to_string();
    };

    // "category" and "user" carry a subcommand worth naming
    if matches!(command.as_str(), "category" | "user") {
        if let Some(sub) = positional.next() {
            return format!("{command} {sub}");
        }
    }

    command
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::CategoryNotFound(_) => vec!["tdl category list".to_string()],
        Error::ItemNotFound(_) => vec!["tdl list".to_string()],
        Error::CategoryNotEmpty { name, .. } => {
            vec![format!("tdl list to see the items still in '{name}'")]
        }
        Error::InvalidConfig(_) => vec!["fix tdl.toml then retry".to_string()],
        _ => Vec::new(),
    }
}
