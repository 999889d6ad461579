use std::{fmt::Write, ops::Range, path::Path};

use thiserror::Error;

use crate::codec::EncodeError;

/// Why a keymap source failed to compile.
#[derive(Debug, Error)]
pub enum KeymapErrorKind {
    #[error("{0}")]
    Syntax(&'static str),
    #[error(transparent)]
    Keycode(#[from] EncodeError),
    #[error("Invalid value {0:?}")]
    InvalidValue(String),
    #[error("Layer {layer} has {keys} keys; expected {expected}")]
    LayerLength {
        layer: usize,
        keys: usize,
        expected: usize,
    },
}

/// A keymap error and the byte range of the source it points at.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct KeymapError {
    pub kind: KeymapErrorKind,
    pub span: Option<Range<usize>>,
}

/// Where a span starts: 1 based line, 0 based char column, and the byte
/// range of the source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
    pub text: Range<usize>,
}

impl KeymapError {
    pub fn new(kind: impl Into<KeymapErrorKind>, span: Range<usize>) -> Self {
        Self {
            kind: kind.into(),
            span: Some(span),
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// The span in chars rather than bytes, as report renderers count.
    pub fn char_span(&self, source: &str) -> Option<Range<usize>> {
        let span = self.span.as_ref()?;
        let chars = |at: usize| {
            source
                .get(..at)
                .map_or_else(|| source.chars().count(), |s| s.chars().count())
        };
        Some(chars(span.start)..chars(span.end))
    }

    pub fn location(&self, source: &str) -> Option<Location> {
        let start = self.span.as_ref()?.start.min(source.len());
        let before = source.get(..start)?;
        let sol = before.rfind('\n').map_or(0, |i| i + 1);
        let eol = source[start..].find('\n').map_or(source.len(), |i| start + i);
        Some(Location {
            line: before.matches('\n').count() + 1,
            col: before[sol..].chars().count(),
            text: sol..eol,
        })
    }

    /// A plain, colourless report in `error: ... --> file:line:col` form.
    pub fn long_format(&self, source_file: &Path, source: &str) -> String {
        let mut out = format!("error: {} \n", self.kind);
        if let Some(loc) = self.location(source) {
            let width = loc.line.to_string().len().max(2);
            let _ = writeln!(out, "   --> {}:{}:{}", source_file.display(), loc.line, loc.col);
            let _ = writeln!(out, " {:>width$} | {}", loc.line, &source[loc.text]);
        }
        out
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod test;
