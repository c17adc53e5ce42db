//! Source locations for diagnostics.

use std::fmt;
use std::sync::Arc;

/// A position inside a template source file.
///
/// Lines and columns are 1-based and count graphemes, not bytes. Locations
/// are immutable; [`advance_column`](Self::advance_column) and
/// [`newline`](Self::newline) return new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: Arc<str>,
    line: usize,
    column: usize,
}

impl SourceLocation {
    /// Location at line 1, column 1 of `file`.
    pub fn start(file: impl Into<Arc<str>>) -> Self {
        Self::new(file, 1, 1)
    }

    /// Create a location. `line` and `column` are clamped to at least 1.
    pub fn new(file: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            column: column.max(1),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Shared handle to the file identifier.
    pub fn file_arc(&self) -> &Arc<str> {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Same line, next column.
    #[must_use]
    pub fn advance_column(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column + 1,
        }
    }

    /// Next line, first column.
    #[must_use]
    pub fn newline(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line: self.line + 1,
            column: 1,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        let loc = SourceLocation::start("index.html");
        assert_eq!(loc.file(), "index.html");
        assert_eq!(loc.line(), 1);
        assert_eq!(loc.column(), 1);
    }

    #[test]
    fn test_advance_column_is_pure() {
        let loc = SourceLocation::start("a.html");
        let next = loc.advance_column();
        assert_eq!(loc.column(), 1);
        assert_eq!(next.column(), 2);
        assert_eq!(next.line(), 1);
    }

    #[test]
    fn test_newline_resets_column() {
        let loc = SourceLocation::new("a.html", 3, 17).newline();
        assert_eq!(loc.line(), 4);
        assert_eq!(loc.column(), 1);
    }

    #[test]
    fn test_clamps_to_one() {
        let loc = SourceLocation::new("a.html", 0, 0);
        assert_eq!((loc.line(), loc.column()), (1, 1));
    }

    #[test]
    fn test_display() {
        let loc = SourceLocation::new("views/home.html", 2, 5);
        assert_eq!(loc.to_string(), "views/home.html:2:5");
    }
}
