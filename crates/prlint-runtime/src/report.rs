//! Verdict reporting.
//!
//! The engine never exits the process itself. A [`VerdictSink`] receives the
//! success or failure signal and the host maps it to an exit status.

use std::io::{self, Write};

use crate::orchestrator::RunReport;

/// Receives the final signal of a run.
pub trait VerdictSink {
    fn success(&mut self) -> io::Result<()>;

    fn failure(&mut self, message: &str) -> io::Result<()>;
}

/// Writes GitHub Actions workflow commands and tracks the exit code.
pub struct ActionsSink<W: Write> {
    out: W,
    exit_code: i32,
}

impl<W: Write> ActionsSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, exit_code: 0 }
    }

    /// 0 after success, 1 after failure.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VerdictSink for ActionsSink<W> {
    fn success(&mut self) -> io::Result<()> {
        self.exit_code = 0;
        Ok(())
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        self.exit_code = 1;
        writeln!(self.out, "::error::{}", escape_data(message))
    }
}

/// Escape a workflow-command message.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Send a run's result to `sink`.
///
/// When a custom failure message is configured, it is also logged after a
/// blank line so it stands out from the per-check diagnostics.
pub fn report_run(
    sink: &mut dyn VerdictSink,
    report: &RunReport,
    custom_error_message: Option<&str>,
) -> io::Result<()> {
    let result = match report {
        RunReport::Skipped { .. } => return sink.success(),
        RunReport::Evaluated(result) => result,
    };

    if result.verdict.passed {
        tracing::info!("PR lint passed");
        return sink.success();
    }

    if let Some(custom) = custom_error_message.filter(|m| !m.is_empty()) {
        tracing::info!("");
        tracing::info!("{}", custom);
    }

    let message = result
        .verdict
        .message
        .as_deref()
        .unwrap_or(prlint_core::AND_FAILURE_MESSAGE);
    sink.failure(message)
}
