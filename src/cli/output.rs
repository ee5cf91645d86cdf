//! Output formatting for CLI commands

use serde::Serialize;

use crate::storage::DefaultFormat;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<DefaultFormat> for OutputFormat {
    fn from(format: DefaultFormat) -> Self {
        match format {
            DefaultFormat::Text => OutputFormat::Text,
            DefaultFormat::Json => OutputFormat::Json,
        }
    }
}

/// Routes command results to stdout and diagnostics to stderr
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        let data = serde_json::json!({ "success": true, "message": message });
        self.report(&data, || println!("{}", message));
    }

    /// Prints a command's result
    ///
    /// JSON mode prints `data` on one line; text mode runs `text`, which
    /// prints the human layout.
    pub fn report<T: Serialize>(&self, data: &T, text: impl FnOnce()) {
        match self.format {
            OutputFormat::Text => text(),
            OutputFormat::Json => match serde_json::to_string(data) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("{}", serde_json::json!({ "error": e.to_string() })),
            },
        }
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
