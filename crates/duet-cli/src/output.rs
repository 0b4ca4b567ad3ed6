//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly: pretty output for terminals, plain text for pipes, stable
//! JSON for scripts.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag, then the hidden `--json` alias
//! 2. `DUET_FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY,
//!    [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use duet_core::ErrorCode;
use serde::Serialize;
use std::env;
use std::io::{self, IsTerminal, Write};

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output for terminals.
    Pretty,
    /// Plain text for pipes and scripts.
    Text,
    /// Machine-readable JSON, one object per result.
    Json,
}

impl OutputMode {
    /// Resolve the effective mode from flags, environment, and TTY state.
    #[must_use]
    pub fn resolve(format_flag: Option<Self>, json_flag: bool) -> Self {
        let format_env = env::var("DUET_FORMAT").ok();
        let is_tty = io::stdout().is_terminal();
        Self::resolve_inner(format_flag, json_flag, format_env.as_deref(), is_tty)
    }

    /// Core resolution logic, separated from I/O for testability.
    fn resolve_inner(
        format_flag: Option<Self>,
        json_flag: bool,
        format_env: Option<&str>,
        is_tty: bool,
    ) -> Self {
        if let Some(mode) = format_flag {
            return mode;
        }
        if json_flag {
            return Self::Json;
        }
        if let Some(val) = format_env {
            match val.to_lowercase().as_str() {
                "json" => return Self::Json,
                "text" => return Self::Text,
                "pretty" => return Self::Pretty,
                // Unknown value: fall through to TTY detection.
                _ => {}
            }
        }
        if is_tty { Self::Pretty } else { Self::Text }
    }
}

/// A CLI-surfaced failure: machine code, message, optional hint.
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliError {
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            hint: code.hint().map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn with_detail(code: ErrorCode, detail: impl std::fmt::Display) -> Self {
        Self {
            code: code.code(),
            message: format!("{}: {detail}", code.message()),
            hint: code.hint().map(ToString::to_string),
        }
    }
}

/// Render a result value: the closure writes the pretty/text form, JSON
/// mode serializes the value as-is.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match mode {
        OutputMode::Pretty | OutputMode::Text => human(value, &mut out),
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| "{}".to_string());
            writeln!(out, "{json}")
        }
    }
}

/// Render a plain success message.
pub fn render_success(mode: OutputMode, message: &str) -> io::Result<()> {
    #[derive(Serialize)]
    struct Ok<'a> {
        ok: bool,
        message: &'a str,
    }
    render(
        mode,
        &Ok { ok: true, message },
        |v, w| writeln!(w, "{}", v.message),
    )
}

/// Render an error to stderr in the active mode.
pub fn render_error(mode: OutputMode, err: &CliError) -> io::Result<()> {
    let mut out = io::stderr().lock();
    match mode {
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error[{}]: {}", err.code, err.message)?;
            if let Some(hint) = &err.hint {
                writeln!(out, "  hint: {hint}")?;
            }
            Ok(())
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(err)
                .unwrap_or_else(|_| "{}".to_string());
            writeln!(out, "{json}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_flag_beats_everything() {
        assert_eq!(
            OutputMode::resolve_inner(Some(OutputMode::Text), true, Some("json"), true),
            OutputMode::Text
        );
    }

    #[test]
    fn json_flag_beats_env_and_tty() {
        assert_eq!(
            OutputMode::resolve_inner(None, true, Some("pretty"), true),
            OutputMode::Json
        );
    }

    #[test]
    fn env_selects_mode() {
        assert_eq!(
            OutputMode::resolve_inner(None, false, Some("json"), true),
            OutputMode::Json
        );
        // Unknown values fall through to the TTY default.
        assert_eq!(
            OutputMode::resolve_inner(None, false, Some("yaml"), false),
            OutputMode::Text
        );
    }

    #[test]
    fn default_is_pretty_on_tty_text_when_piped() {
        assert_eq!(
            OutputMode::resolve_inner(None, false, None, true),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve_inner(None, false, None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn error_carries_code_and_hint() {
        let err = CliError::from_code(ErrorCode::NoSessionFound);
        assert_eq!(err.code, "E1001");
        assert!(err.hint.is_some());
    }
}
