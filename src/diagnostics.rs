//! Non-fatal diagnostics.
//!
//! The pipeline never stops for a bad declaration: it reports it here and
//! carries on with degraded output. Errors make the run fail once it has
//! finished; warnings and notes never do.

use std::cell::RefCell;
use std::fmt;

use crate::model::SourcePos;

/// Tracing target of diagnostic events, so that a front end printing
/// diagnostics itself can filter out the duplicates.
pub const TRACE_TARGET: &str = "luastub::diagnostics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Note,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Note => "note",
            Level::Warning => "warning",
            Level::Error => "error",
        })
    }
}

/// The declaration (and optionally documentation node) a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Qualified name, e.g. `pkg.Foo` or `pkg.Foo#bar`.
    pub name: String,
    pub location: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub subject: Subject,
    /// Kind of the documentation node at fault, if any.
    pub node: Option<&'static str>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = &self.subject.location;
        write!(f, "{}:{}: {}: {}", loc.file, loc.line, self.level, self.message)?;
        if let Some(node) = self.node {
            write!(f, " (in {node})")?;
        }
        write!(f, " [{}]", self.subject.name)
    }
}

/// Append-only diagnostic sink for one run.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, level: Level, subject: &Subject, message: impl Into<String>) {
        self.push(level, subject, None, message.into());
    }

    /// Report a problem with a specific documentation node.
    pub fn report_node(
        &self,
        level: Level,
        subject: &Subject,
        node: &'static str,
        message: impl Into<String>,
    ) {
        self.push(level, subject, Some(node), message.into());
    }

    pub fn error(&self, subject: &Subject, message: impl Into<String>) {
        self.report(Level::Error, subject, message);
    }

    pub fn warning(&self, subject: &Subject, message: impl Into<String>) {
        self.report(Level::Warning, subject, message);
    }

    pub fn note(&self, subject: &Subject, message: impl Into<String>) {
        self.report(Level::Note, subject, message);
    }

    fn push(&self, level: Level, subject: &Subject, node: Option<&'static str>, message: String) {
        let diagnostic = Diagnostic {
            level,
            message,
            subject: subject.clone(),
            node,
        };
        let location = format!("{}:{}", subject.location.file, subject.location.line);
        match level {
            Level::Error => {
                tracing::error!(target: TRACE_TARGET, subject = %subject.name, %location, "{}", diagnostic.message)
            }
            Level::Warning => {
                tracing::warn!(target: TRACE_TARGET, subject = %subject.name, %location, "{}", diagnostic.message)
            }
            Level::Note => {
                tracing::info!(target: TRACE_TARGET, subject = %subject.name, %location, "{}", diagnostic.message)
            }
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }

    pub fn count(&self, level: Level) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
