use crossterm::style::Stylize; // Colours for dialog titles
use std::io::{self, Write};

/// Severity of a result dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

/// A titled block of text shown as the result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub body: String,
}

impl Dialog {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Error, title, body)
    }

    fn new(kind: DialogKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Plain-text rendering framed by rules `width` columns wide
    pub fn render(&self, width: usize) -> String {
        let heading = format!("── {} ", self.title);
        let fill = width.saturating_sub(heading.chars().count());
        format!(
            "{}{}\n{}\n{}\n",
            heading,
            "─".repeat(fill),
            self.body.trim_end(),
            "─".repeat(width)
        )
    }

    /// Print to the terminal; errors go to stderr
    pub fn show(&self) {
        let width = terminal_width().min(72);
        let rendered = self.render(width);
        let (first, rest) = rendered.split_once('\n').unwrap_or((rendered.as_str(), ""));

        let title = match self.kind {
            DialogKind::Info => first.to_string().green().bold(),
            DialogKind::Warning => first.to_string().yellow().bold(),
            DialogKind::Error => first.to_string().red().bold(),
        };

        let result = if self.kind == DialogKind::Error {
            writeln!(io::stderr(), "{}\n{}", title, rest)
        } else {
            writeln!(io::stdout(), "{}\n{}", title, rest)
        };
        if let Err(e) = result {
            log::debug!("Could not print dialog: {}", e);
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}
