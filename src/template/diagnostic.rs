//! Undefined-variable diagnostics

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use super::lexer::Span;

/// A placeholder referencing a variable with no value
#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedVariable {
    /// Trimmed variable name
    pub name: String,
    /// Byte range of the whole `{{ ... }}` placeholder in the message
    pub span: Span,
}

impl UndefinedVariable {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Format the diagnostic with message context using ariadne
    pub fn report(&self, source: &str, filename: &str, color: bool) -> String {
        let mut buf = Vec::new();
        // ariadne counts characters, not bytes.
        let start = char_offset(source, self.span.start);
        let end = char_offset(source, self.span.end);

        let written = Report::build(ReportKind::Warning, filename, start)
            .with_config(Config::default().with_color(color))
            .with_message(format!("undefined variable '{}'", self.name))
            .with_label(
                Label::new((filename, start..end))
                    .with_message("no value for this placeholder")
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: undefined variable '{}'", filename, self.name),
        }
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source
        .get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| source.chars().count())
}
