//! Collector for accumulating diagnostics during a loading pass.
//!
//! The [`DiagnosticCollector`] lets the loader report every problem in a
//! script instead of stopping at the first one.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Emits the error of `result`, if any, and returns its value.
    pub fn check<T>(&mut self, result: Result<T, Diagnostic>) -> Option<T> {
        result.map_err(|diagnostic| self.emit(diagnostic)).ok()
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with every diagnostic.
    /// - Otherwise logs each warning and returns `Ok(())`.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            match diagnostic.labels().first() {
                Some(label) => warn!(span:% = label.span(); "{diagnostic}"),
                None => warn!("{diagnostic}"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_emit_warning_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unknown section `[colors]`"));
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_every_diagnostic() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("unknown dialogue key `XYZ`")
                .with_code(ErrorCode::E104)
                .with_label(Span::new(10..13), "not declared"),
        );
        collector.emit(Diagnostic::warning("unknown attribute"));
        collector.emit(Diagnostic::error("invalid color").with_code(ErrorCode::E403));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E104));
    }

    #[test]
    fn test_collector_check() {
        let mut collector = DiagnosticCollector::new();
        assert_eq!(collector.check(Ok::<_, Diagnostic>(3)), Some(3));
        assert_eq!(collector.check(Err::<u8, _>(Diagnostic::error("bad"))), None);
        assert!(collector.finish().is_err());
    }
}
