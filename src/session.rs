//! Editing session: an image store plus the command loop around it.
//!
//! Commands come from a script file, an interactive reader or a single
//! line. Each one is parsed into a [`Command`] and dispatched to the
//! engine operations or the codecs.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::command::Command;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::operations;
use crate::store::ImageStore;

pub const WELCOME: &str =
    "Welcome to Image processing application!\nPlease type 'quit' to terminate the program.";

/// One failed line of a script.
#[derive(Debug)]
pub struct ScriptFailure {
    /// 1-based line number in the script file
    pub line_number: usize,
    pub line: String,
    pub error: SessionError,
}

/// Outcome of [`Session::run_script`].
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Commands that ran successfully
    pub executed: usize,
    pub failures: Vec<ScriptFailure>,
}

impl ScriptReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Session {
    store: ImageStore,
    config: SessionConfig,
    running_scripts: Vec<PathBuf>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: ImageStore::new(),
            config,
            running_scripts: Vec::new(),
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ImageStore {
        &mut self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Execute one command without printing anything.
    pub fn execute(&mut self, command: &Command) -> Result<(), SessionError> {
        self.execute_to(command, &mut io::sink())
    }

    /// Execute one command. Output of nested scripts goes to `out`.
    pub fn execute_to(&mut self, command: &Command, out: &mut dyn Write) -> Result<(), SessionError> {
        let store = &mut self.store;
        match command {
            Command::Load { path, name } => {
                let buffer = codec::load_image(path)?;
                store.put(name.as_str(), buffer);
            }
            Command::Save { path, name } => {
                codec::save_image(path, store.require(name)?)?;
            }
            Command::Run { path } => {
                self.run_script_to(path, out)?;
            }
            Command::Flip {
                direction,
                source,
                destination,
            } => operations::flip(store, *direction, source, destination)?,
            Command::Brighten {
                increment,
                source,
                destination,
            } => operations::brighten(store, *increment, source, destination)?,
            Command::Greyscale {
                component,
                source,
                destination,
                split,
            } => {
                operations::greyscale(store, *component, source, destination)?;
                preview(store, *split, source, destination)?;
            }
            Command::Sepia {
                source,
                destination,
                split,
            } => {
                operations::sepia(store, source, destination)?;
                preview(store, *split, source, destination)?;
            }
            Command::Filter {
                kernel,
                source,
                destination,
                split,
            } => {
                operations::filter(store, *kernel, source, destination)?;
                preview(store, *split, source, destination)?;
            }
            Command::ColorCorrect {
                source,
                destination,
                split,
            } => {
                operations::color_correct(store, source, destination)?;
                preview(store, *split, source, destination)?;
            }
            Command::Histogram {
                source,
                destination,
            } => operations::histogram(store, source, destination)?,
            Command::Compress {
                percentage,
                source,
                destination,
            } => operations::compress(store, *percentage, source, destination)?,
            Command::RgbSplit {
                source,
                red,
                green,
                blue,
            } => operations::rgb_split(store, source, red, green, blue)?,
            Command::RgbCombine {
                destination,
                red,
                green,
                blue,
            } => operations::rgb_combine(store, destination, red, green, blue)?,
            Command::LevelsAdjust {
                black,
                mid,
                white,
                source,
                destination,
                split,
            } => {
                operations::levels_adjust(store, *black, *mid, *white, source, destination)?;
                preview(store, *split, source, destination)?;
            }
        }
        Ok(())
    }

    /// Parse and execute one command line.
    pub fn execute_line(&mut self, line: &str) -> Result<(), SessionError> {
        self.execute(&Command::parse(line)?)
    }

    /// Run every command of a script file without printing anything.
    pub fn run_script(&mut self, path: &Path) -> Result<ScriptReport, SessionError> {
        self.run_script_to(path, &mut io::sink())
    }

    /// Run every command of a script file, reporting to `out`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Failed commands
    /// are collected in the report; with `continue_on_error` off the script
    /// stops at the first one. Only an unreadable script is an error.
    pub fn run_script_to(
        &mut self,
        path: &Path,
        out: &mut dyn Write,
    ) -> Result<ScriptReport, SessionError> {
        if self.running_scripts.iter().any(|running| running == path) {
            return Err(SessionError::ScriptRecursion(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;

        self.running_scripts.push(path.to_path_buf());
        let report = self.run_lines(&content, out);
        self.running_scripts.pop();
        let report = report?;

        if report.is_success() {
            tracing::info!(script = %path.display(), executed = report.executed, "Script finished");
            self.say(out, &format!("Script {} ran successfully.", path.display()))?;
        } else {
            tracing::warn!(
                script = %path.display(),
                executed = report.executed,
                failed = report.failures.len(),
                "Script finished with failures"
            );
            for failure in &report.failures {
                self.say(
                    out,
                    &format!(
                        "Invalid command provided in script '{}' command '{}'.",
                        path.display(),
                        failure.line
                    ),
                )?;
            }
        }
        Ok(report)
    }

    fn run_lines(&mut self, content: &str, out: &mut dyn Write) -> Result<ScriptReport, SessionError> {
        let mut report = ScriptReport::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match self.run_reported(line, out)? {
                Ok(()) => report.executed += 1,
                Err(error) => {
                    report.failures.push(ScriptFailure {
                        line_number: index + 1,
                        line: line.to_string(),
                        error,
                    });
                    if !self.config.continue_on_error {
                        break;
                    }
                }
            }
        }
        Ok(report)
    }

    /// Execute a line and print its status. The outer result is a write
    /// failure on `out`, the inner one the command's own outcome.
    fn run_reported(
        &mut self,
        line: &str,
        out: &mut dyn Write,
    ) -> Result<Result<(), SessionError>, SessionError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                tracing::warn!(line, %error, "Invalid command");
                self.say(out, "Invalid command entered!")?;
                return Ok(Err(error));
            }
        };

        let outcome = self.execute_to(&command, out);
        match &outcome {
            // Scripts print their own summary.
            Err(error) if matches!(command, Command::Run { .. }) => {
                tracing::warn!(command = %command, %error, "Script failed");
                self.say(out, &error.to_string())?;
            }
            Ok(()) if matches!(command, Command::Run { .. }) => {}
            Ok(()) => {
                self.say(out, &format!("Image {} operation successful.", command))?;
            }
            Err(error) => {
                tracing::warn!(command = %command, %error, "Command failed");
                self.say(out, &error.to_string())?;
                self.say(out, &format!("Image {} operation failed.", command))?;
            }
        }
        Ok(outcome)
    }

    /// Read commands from `reader` until `quit` or end of input.
    pub fn interact(&mut self, reader: impl BufRead, out: &mut dyn Write) -> Result<(), SessionError> {
        writeln!(out, "{}", WELCOME)?;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") {
                break;
            }
            if line.is_empty() {
                continue;
            }
            if self.run_reported(line, out)?.is_err() {
                tracing::debug!(line = %line, "Shell command failed, continuing");
            }
        }
        out.flush()?;
        Ok(())
    }

    fn say(&self, out: &mut dyn Write, message: &str) -> Result<(), SessionError> {
        if self.config.report_status {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }
}

/// Run the in-place preview after a command with a `split` suffix.
fn preview(
    store: &mut ImageStore,
    split: Option<u8>,
    source: &str,
    destination: &str,
) -> Result<(), SessionError> {
    if let Some(percentage) = split {
        operations::operation_preview(store, percentage as i32, source, destination)?;
    }
    Ok(())
}
