use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Category, ErrorCode, Severity};

/// A single problem found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub category: Category,
    /// 1-based line, 0 when unknown.
    pub line: usize,
    /// 1-based column, 0 when unknown.
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        code: ErrorCode,
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            category: code.category(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: ({} [{}]) {}",
            self.line, self.code, self.severity, self.message
        )
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorLog {
    entries: Vec<Diagnostic>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Record a new diagnostic.
    pub fn log(
        &mut self,
        code: ErrorCode,
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) {
        self.add(Diagnostic::new(code, severity, line, column, message));
    }

    /// Total number of entries, regardless of severity.
    pub fn num_errors(&self) -> usize {
        self.entries.len()
    }

    pub fn num_fails_with_severity(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any entry has Error or Fatal severity.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.entries.iter().any(|d| d.code == code)
    }

    /// Removes the first entry with the given code.
    pub fn remove(&mut self, code: ErrorCode) -> Option<Diagnostic> {
        let index = self.entries.iter().position(|d| d.code == code)?;
        Some(self.entries.remove(index))
    }

    /// Removes every entry with the given code, returning how many went.
    pub fn remove_all(&mut self, code: ErrorCode) -> usize {
        let before = self.entries.len();
        self.entries.retain(|d| d.code != code);
        before - self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Diagnostic> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// A copy of the log holding only entries that are not errors.
    pub fn warnings_only(&self) -> ErrorLog {
        ErrorLog {
            entries: self
                .entries
                .iter()
                .filter(|d| !d.is_error())
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Diagnostic> for ErrorLog {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.add(diagnostic);
        }
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> ErrorLog {
        let mut log = ErrorLog::new();
        log.log(ErrorCode::MISSING_XML_ENCODING, Severity::Warning, 1, 1, "no encoding");
        log.log(ErrorCode::TASK_MODEL_REF, Severity::Error, 12, 5, "unknown model 'm2'");
        log.log(ErrorCode::TASK_MODEL_REF, Severity::Error, 13, 5, "unknown model 'm3'");
        log
    }

    #[test]
    fn test_counts() {
        let log = sample_log();
        assert_eq!(log.num_errors(), 3);
        assert_eq!(log.num_fails_with_severity(Severity::Error), 2);
        assert_eq!(log.num_fails_with_severity(Severity::Fatal), 0);
        assert!(log.has_errors());
        assert!(log.contains(ErrorCode::TASK_MODEL_REF));
    }

    #[test]
    fn test_remove_first_and_all() {
        let mut log = sample_log();
        let removed = log.remove(ErrorCode::TASK_MODEL_REF).unwrap();
        assert_eq!(removed.line, 12);
        assert_eq!(log.num_errors(), 2);

        assert_eq!(log.remove_all(ErrorCode::TASK_MODEL_REF), 1);
        assert!(!log.has_errors());
        assert!(log.remove(ErrorCode::TASK_MODEL_REF).is_none());
    }

    #[test]
    fn test_display() {
        let log = sample_log();
        let text = log.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "line 1: (1002 [Warning]) no encoding");
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_warnings_only() {
        let log = sample_log().warnings_only();
        assert_eq!(log.num_errors(), 1);
        assert!(!log.has_errors());
    }
}
