//! Diagnostics for operation catalog validation.
//!
//! Locations are field paths inside an operation (`GetCategory.category.products`)
//! rather than source spans, since operations are built from descriptors.

use std::fmt;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// The operation will be rejected by the server.
    Error,
    /// The operation works but is suspicious.
    Warning,
}

/// A label attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Dotted path to the offending element.
    pub path: String,
    /// The label message.
    pub message: String,
}

impl Label {
    /// Creates a new label.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// Error code.
    pub code: &'static str,
    /// Short title.
    pub title: String,
    /// Detailed message.
    pub message: Option<String>,
    /// Labels pointing to operation paths.
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: &'static str, title: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code,
            title: title.into(),
            message: None,
            labels: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: &'static str, title: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code,
            title: title.into(),
            message: None,
            labels: Vec::new(),
        }
    }

    /// Adds a message to the diagnostic.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a label at a path.
    pub fn with_path(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(path, message));
        self
    }

    /// Returns the primary path, if any.
    pub fn primary_path(&self) -> Option<&str> {
        self.labels.first().map(|l| l.path.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.title)?;
        if let Some(path) = self.primary_path() {
            write!(f, " at {}", path)?;
        }
        Ok(())
    }
}

/// A collection of diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Creates a new empty diagnostic bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Adds an error diagnostic.
    pub fn error(
        &mut self,
        code: &'static str,
        title: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(Diagnostic::error(code, title).with_path(path, message));
    }

    /// Adds a warning diagnostic.
    pub fn warning(
        &mut self,
        code: &'static str,
        title: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(Diagnostic::warning(code, title).with_path(path, message));
    }

    /// Moves every diagnostic from `other` into this bag.
    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns an iterator over errors.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns an iterator over warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Diagnostic codes reported by catalog validation.
pub mod codes {
    pub const UNKNOWN_TYPE: &str = "UNKNOWN_TYPE";
    pub const UNKNOWN_FIELD: &str = "UNKNOWN_FIELD";
    pub const UNKNOWN_ARGUMENT: &str = "UNKNOWN_ARGUMENT";
    pub const MISSING_ARGUMENT: &str = "MISSING_ARGUMENT";
    pub const UNDECLARED_VARIABLE: &str = "UNDECLARED_VARIABLE";
    pub const UNUSED_VARIABLE: &str = "UNUSED_VARIABLE";
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const MISSING_SELECTION: &str = "MISSING_SELECTION";
    pub const LEAF_SELECTION: &str = "LEAF_SELECTION";
}
