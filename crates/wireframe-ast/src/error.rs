//! Compile-time diagnostics shared by every stage.
//!
//! # Design
//!
//! - `Diagnostic` — single problem report with optional source location
//! - `ErrorKind` — categorizes problems by compiler phase
//! - `Severity` — error, warning, or note
//! - `DiagnosticFormatter` — renders diagnostics with source snippets
//!
//! Lexer and parser diagnostics always carry a span; normalizer diagnostics
//! carry the span of the offending AST node where one is available.

use crate::foundation::{SourceMap, Span};
use std::fmt;

/// A single problem report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Category of this diagnostic
    pub kind: ErrorKind,
    /// Severity level
    pub severity: Severity,
    /// Source location, if known
    pub span: Option<Span>,
    /// Human-readable message
    pub message: String,
    /// Additional notes or suggestions
    pub notes: Vec<String>,
}

/// Category of diagnostic, by the phase that detected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Lex/parse phase
    /// Invalid character or grammar violation
    Syntax,

    // Normalizer: catalog
    /// Component type not in the catalog and not defined by the project
    UnknownComponent,
    /// Layout type not in the catalog
    UnknownLayout,
    /// Property key not accepted by this component or layout kind
    UnknownProperty,
    /// Required property is absent
    MissingProperty,
    /// Property value has the wrong type, is outside its range, or is not
    /// one of its enumerated values
    InvalidPropertyValue,

    // Normalizer: macro expansion
    /// Component definitions reference each other in a cycle
    CircularDefinition,

    // Normalizer: structure
    /// Two screens share a name
    DuplicateScreen,
    /// More than one theme, colors, or mocks block
    DuplicateBlock,
    /// Project declares no screens
    MissingScreen,
    /// A container has the wrong number of children for its layout kind
    /// (split needs exactly two, panel exactly one)
    ChildArity,
    /// A container has no children (or a grid has no cells)
    EmptyContainer,
    /// A cell outside a grid, or a grid child that is not a cell
    CellPlacement,
    /// Unknown theme key or unexpected theme value
    Theme,

    /// Internal compiler error (bug)
    Internal,
}

impl ErrorKind {
    /// Human-readable name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownComponent => "unknown component",
            ErrorKind::UnknownLayout => "unknown layout",
            ErrorKind::UnknownProperty => "unknown property",
            ErrorKind::MissingProperty => "missing property",
            ErrorKind::InvalidPropertyValue => "invalid property value",
            ErrorKind::CircularDefinition => "circular definition",
            ErrorKind::DuplicateScreen => "duplicate screen",
            ErrorKind::DuplicateBlock => "duplicate block",
            ErrorKind::MissingScreen => "missing screen",
            ErrorKind::ChildArity => "wrong child count",
            ErrorKind::EmptyContainer => "empty container",
            ErrorKind::CellPlacement => "cell placement",
            ErrorKind::Theme => "theme error",
            ErrorKind::Internal => "internal compiler error",
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational note
    Note,
    /// Warning (compilation proceeds)
    Warning,
    /// Error (compilation cannot proceed)
    Error,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(kind: ErrorKind, span: Option<Span>, message: impl Into<String>) -> Self {
        Self::with_severity(kind, Severity::Error, span, message.into())
    }

    /// Creates a new warning diagnostic.
    pub fn warning(kind: ErrorKind, span: Option<Span>, message: impl Into<String>) -> Self {
        Self::with_severity(kind, Severity::Warning, span, message.into())
    }

    /// Creates a new note diagnostic.
    pub fn note(kind: ErrorKind, span: Option<Span>, message: impl Into<String>) -> Self {
        Self::with_severity(kind, Severity::Note, span, message.into())
    }

    fn with_severity(kind: ErrorKind, severity: Severity, span: Option<Span>, message: String) -> Self {
        Self {
            kind,
            severity,
            span,
            message,
            notes: Vec::new(),
        }
    }

    /// Adds a note or suggestion (for chaining).
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// True if this diagnostic blocks compilation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// True if any diagnostic in the slice has error severity.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.kind.name(), self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Formats diagnostics with source code context.
///
/// Produces messages with file path, line/column location, the source line,
/// and `^^^` indicators under the offending span, followed by any notes.
///
/// # Examples
///
/// ```
/// # use wireframe_ast::error::*;
/// # use wireframe_ast::foundation::{Span, SourceMap};
/// # use std::path::PathBuf;
/// let mut sources = SourceMap::new();
/// let file_id = sources.add_file(PathBuf::from("app.wire"), "component Foo".to_string());
/// let span = Span::new(file_id, 10, 13, 1);
///
/// let diag = Diagnostic::error(ErrorKind::UnknownComponent, Some(span), "unknown component 'Foo'");
/// let formatted = DiagnosticFormatter::new(&sources).format(&diag);
/// assert!(formatted.contains("app.wire:1:11"));
/// ```
pub struct DiagnosticFormatter<'a> {
    sources: &'a SourceMap,
}

impl<'a> DiagnosticFormatter<'a> {
    /// Creates a new diagnostic formatter.
    pub fn new(sources: &'a SourceMap) -> Self {
        Self { sources }
    }

    /// Formats a diagnostic as a string with source context.
    pub fn format(&self, diag: &Diagnostic) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}: {}: {}\n",
            diag.severity,
            diag.kind.name(),
            diag.message
        ));

        if let Some(span) = &diag.span {
            let file_path = self.sources.file_path(span);
            let (line, col) = self.sources.line_col(span);
            output.push_str(&format!("  --> {}:{}:{}\n", file_path.display(), line, col));

            let file = self.sources.file(span);
            if let Some(source_line) = file.line_text(line) {
                let source_line = source_line.trim_end_matches('\n');
                output.push_str("   |\n");
                output.push_str(&format!("{:3} | {}\n", line, source_line));

                let start_col = col as usize;
                let span_len = (span.end - span.start) as usize;
                let end_col = (start_col + span_len).min(source_line.len() + 1);
                let underline = " ".repeat(start_col.saturating_sub(1))
                    + &"^".repeat(end_col.saturating_sub(start_col).max(1));
                output.push_str(&format!("   | {}\n", underline));
            }
        }

        for note in &diag.notes {
            output.push_str(&format!("   = help: {}\n", note));
        }

        output
    }

    /// Formats multiple diagnostics, separated by blank lines.
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| self.format(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dummy_span() -> Span {
        Span::new(0, 0, 5, 1)
    }

    fn test_sources() -> SourceMap {
        let mut sources = SourceMap::new();
        sources.add_file(
            PathBuf::from("app.wire"),
            "component Foo\ncomponent Bar".to_string(),
        );
        sources
    }

    #[test]
    fn test_error_creation() {
        let diag = Diagnostic::error(
            ErrorKind::MissingProperty,
            Some(dummy_span()),
            "grid requires 'columns'",
        );

        assert_eq!(diag.kind, ErrorKind::MissingProperty);
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.is_error());
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn test_warning_does_not_block() {
        let diag = Diagnostic::warning(ErrorKind::Theme, None, "unknown theme key 'densty'");
        assert!(!diag.is_error());
        assert!(!has_errors(&[diag]));
    }

    #[test]
    fn test_with_note() {
        let diag = Diagnostic::error(
            ErrorKind::InvalidPropertyValue,
            Some(dummy_span()),
            "direction must be 'vertical' or 'horizontal'",
        )
        .with_note("found 'diagonal'");

        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(ErrorKind::UnknownComponent, None, "unknown component 'Foo'");
        let display = format!("{}", diag);
        assert!(display.contains("error"));
        assert!(display.contains("unknown component"));
        assert!(display.contains("'Foo'"));
    }

    #[test]
    fn test_formatter_basic() {
        let sources = test_sources();
        let span = Span::new(0, 10, 13, 1); // "Foo"

        let diag = Diagnostic::error(
            ErrorKind::UnknownComponent,
            Some(span),
            "unknown component 'Foo'",
        );

        let formatted = DiagnosticFormatter::new(&sources).format(&diag);
        assert!(formatted.contains("error"));
        assert!(formatted.contains("unknown component 'Foo'"));
        assert!(formatted.contains("app.wire:1:11"));
        assert!(formatted.contains("component Foo"));
        assert!(formatted.contains("^^^"));
    }

    #[test]
    fn test_formatter_without_span() {
        let sources = test_sources();
        let diag = Diagnostic::error(ErrorKind::MissingScreen, None, "project has no screens");

        let formatted = DiagnosticFormatter::new(&sources).format(&diag);
        assert!(formatted.contains("project has no screens"));
        assert!(!formatted.contains("-->"));
    }

    #[test]
    fn test_formatter_with_note() {
        let sources = test_sources();
        let span = Span::new(0, 10, 13, 1);

        let diag = Diagnostic::error(
            ErrorKind::UnknownComponent,
            Some(span),
            "unknown component 'Foo'",
        )
        .with_note("did you mean 'Form'?");

        let formatted = DiagnosticFormatter::new(&sources).format(&diag);
        assert!(formatted.contains("help: did you mean 'Form'?"));
    }

    #[test]
    fn test_formatter_multiple() {
        let sources = test_sources();
        let diags = vec![
            Diagnostic::error(
                ErrorKind::UnknownComponent,
                Some(Span::new(0, 10, 13, 1)),
                "unknown component 'Foo'",
            ),
            Diagnostic::error(
                ErrorKind::UnknownComponent,
                Some(Span::new(0, 24, 27, 2)),
                "unknown component 'Bar'",
            ),
        ];

        let formatted = DiagnosticFormatter::new(&sources).format_all(&diags);
        assert!(formatted.contains("'Foo'"));
        assert!(formatted.contains("'Bar'"));
        assert!(formatted.contains("app.wire:2:"));
    }
}
