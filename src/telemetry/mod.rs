//! Human-readable rendering for progress events and error records.
//!
//! Kept separate from `tracing` instrumentation: `tracing` is for structured
//! logs consumed by an aggregator, this module is for the colorized
//! `pretty_print` helpers used in CLI output and test failure messages.

use crate::channels::errors::ErrorEvent;
use crate::event_bus::ProgressEvent;

pub const CONTEXT_COLOR: &str = "\x1b[32m"; // green
pub const LINE_COLOR: &str = "\x1b[35m"; // magenta / dark pink
pub const RESET_COLOR: &str = "\x1b[0m";

/// Whether to emit ANSI color codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatterMode {
    /// Auto-detect based on whether stderr is a TTY.
    #[default]
    Auto,
    Colored,
    Plain,
}

impl FormatterMode {
    fn colors_enabled(self) -> bool {
        match self {
            FormatterMode::Colored => true,
            FormatterMode::Plain => false,
            FormatterMode::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Rendered output for a telemetry item that can be consumed by sinks.
#[derive(Clone, Debug, Default)]
pub struct EventRender {
    pub context: Option<String>,
    pub lines: Vec<String>,
}

impl EventRender {
    pub fn join_lines(&self) -> String {
        self.lines.join("")
    }
}

pub trait TelemetryFormatter: Send + Sync {
    fn render_event(&self, event: &ProgressEvent) -> EventRender;
    fn render_errors(&self, errors: &[ErrorEvent]) -> Vec<EventRender>;
}

pub struct PlainFormatter {
    mode: FormatterMode,
}

impl PlainFormatter {
    pub fn with_mode(mode: FormatterMode) -> Self {
        Self { mode }
    }

    fn line_color(&self) -> &'static str {
        if self.mode.colors_enabled() {
            LINE_COLOR
        } else {
            ""
        }
    }

    fn context_color(&self) -> &'static str {
        if self.mode.colors_enabled() {
            CONTEXT_COLOR
        } else {
            ""
        }
    }

    fn reset(&self) -> &'static str {
        if self.mode.colors_enabled() {
            RESET_COLOR
        } else {
            ""
        }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::with_mode(FormatterMode::Auto)
    }
}

fn format_error_chain(
    error: &crate::channels::errors::LadderError,
    indent: usize,
    line_color: &str,
    reset: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(cause) = &error.cause {
        let indent_str = "  ".repeat(indent);
        lines.push(format!(
            "{line_color}{}cause: {}{reset}\n",
            indent_str, cause.message
        ));
        lines.extend(format_error_chain(cause, indent + 1, line_color, reset));
    }
    lines
}

impl TelemetryFormatter for PlainFormatter {
    fn render_event(&self, event: &ProgressEvent) -> EventRender {
        let (lc, reset) = (self.line_color(), self.reset());
        let line = format!("{lc}{}{reset}\n", event.summary());
        EventRender {
            context: Some(event.type_name().to_string()),
            lines: vec![line],
        }
    }

    fn render_errors(&self, errors: &[ErrorEvent]) -> Vec<EventRender> {
        let (lc, cc, reset) = (self.line_color(), self.context_color(), self.reset());
        errors
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let mut lines = Vec::new();
                let scope_str = format!("{cc}{:?}{reset}", e.scope);
                lines.push(format!("[{}] {} | {}\n", i, e.when, scope_str));
                lines.push(format!("{lc}  error: {}{reset}\n", e.error.message));
                lines.extend(format_error_chain(&e.error, 1, lc, reset));
                if !e.tags.is_empty() {
                    lines.push(format!("{lc}  tags: {:?}{reset}\n", e.tags));
                }
                if !e.context.is_null() {
                    lines.push(format!("{lc}  context: {}{reset}\n", e.context));
                }
                EventRender {
                    context: Some(format!("{:?}", e.scope)),
                    lines,
                }
            })
            .collect()
    }
}
