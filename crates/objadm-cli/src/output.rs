//! Output formatting utilities for CLI commands.
//!
//! Every command result is a [`Message`] with a structured (JSON) and a
//! styled (human) rendering. The [`Printer`] picks one of them from its
//! [`OutputFormat`], writes results to stdout and diagnostics to stderr.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::error::CommandError;
use crate::style::Theme;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable styled output.
    #[default]
    Table,
    /// Machine-readable JSON output.
    Json,
}

impl OutputFormat {
    /// Render a message in this format.
    pub fn format<M: Message + ?Sized>(&self, msg: &M, theme: &Theme) -> serde_json::Result<String> {
        match self {
            Self::Table => Ok(msg.render(theme)),
            Self::Json => msg.to_json(),
        }
    }
}

/// A command result that can be printed in either output format.
pub trait Message {
    /// Pretty-indented JSON with stable field names.
    fn to_json(&self) -> serde_json::Result<String>;

    /// Styled human-readable rendering.
    fn render(&self, theme: &Theme) -> String;
}

/// Serialize a message body as pretty-indented JSON.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Printer that writes messages and diagnostics.
pub struct Printer<W: Write = Box<dyn Write>> {
    stdout: W,
    stderr: W,
    format: OutputFormat,
    theme: Theme,
}

impl Printer<Box<dyn Write>> {
    /// Create a printer writing to the process's stdout and stderr.
    pub fn stdio(format: OutputFormat, theme: Theme) -> Self {
        Self {
            stdout: Box::new(std::io::stdout()),
            stderr: Box::new(std::io::stderr()),
            format,
            theme,
        }
    }
}

impl<W: Write> Printer<W> {
    /// Create a printer with custom writers.
    pub fn new(stdout: W, stderr: W, format: OutputFormat, theme: Theme) -> Self {
        Self {
            stdout,
            stderr,
            format,
            theme,
        }
    }

    /// Print one message to stdout.
    pub fn print_msg<M: Message + ?Sized>(&mut self, msg: &M) -> std::io::Result<()> {
        let text = self
            .format
            .format(msg, &self.theme)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.stdout, "{}", text)
    }

    /// Print a fatal diagnostic to stderr.
    ///
    /// In JSON mode the diagnostic is a single compact error object so that
    /// scripts can parse it line by line.
    pub fn print_error(&mut self, err: &CommandError) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                let mut line = format!("objadm: <ERROR> {}", err.headline());
                if let Some(cause) = err.cause() {
                    line.push_str(": ");
                    line.push_str(&cause);
                }
                writeln!(self.stderr, "{}", self.theme.colorize(&line, self.theme.error))?;
                if let CommandError::Usage { usage, .. } = err {
                    writeln!(self.stderr, "\nUSAGE:\n  {}", usage)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let obj = serde_json::json!({
                    "status": "error",
                    "error": {
                        "message": err.headline(),
                        "cause": err.cause(),
                        "exitCode": err.exit_code(),
                    },
                });
                writeln!(self.stderr, "{}", obj)
            }
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

impl<W: Write> fmt::Debug for Printer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("format", &self.format)
            .field("theme", &self.theme)
            .finish()
    }
}
