//! Diagnostic types and rendering
//!
//! Diagnostics are ephemeral: the detector recomputes them from the live
//! tree on every pass, and nothing here survives an edit. Rendering to
//! human-readable text or JSON is the host-visible surface.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cst::TextRange;
use crate::error::AutopropError;
use crate::result::Result;

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Hints for improvements
    Hint,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Category tag used to group rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Correctness,
    Simplification,
    Style,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
            RuleCategory::Simplification => write!(f, "simplification"),
            RuleCategory::Style => write!(f, "style"),
        }
    }
}

/// Static description of a rule: stable id, default severity, category
#[derive(Debug, Clone, Copy)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    pub severity: Severity,
}

/// A half-open byte span into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start().into(),
            end: range.end().into(),
        }
    }
}

/// A diagnostic produced by one detector pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier of the rule that produced this diagnostic
    pub rule_id: String,
    pub severity: Severity,
    pub category: RuleCategory,
    /// Human-readable message
    pub message: String,
    /// Span of the property name token the diagnostic is anchored at
    pub span: Span,
    /// Simple name of the flagged property
    pub property_name: String,
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        category: RuleCategory,
        message: impl Into<String>,
        span: Span,
        property_name: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            category,
            message: message.into(),
            span,
            property_name: property_name.into(),
        }
    }
}

/// Maps byte offsets to 1-based line/column pairs
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

/// Render diagnostics as one `path:line:col severity[rule] message` line each
pub fn render_human(path: &Path, source: &str, diagnostics: &[Diagnostic]) -> String {
    let index = LineIndex::new(source);
    let mut out = String::new();
    for diagnostic in diagnostics {
        let (line, column) = index.position(diagnostic.span.start as usize);
        out.push_str(&format!(
            "{}:{}:{} {}[{}] {}\n",
            path.display(),
            line,
            column,
            diagnostic.severity,
            diagnostic.rule_id,
            diagnostic.message
        ));
    }
    out
}

/// Render diagnostics as a JSON array
pub fn render_json(diagnostics: &[Diagnostic]) -> Result<String> {
    serde_json::to_string_pretty(diagnostics)
        .map_err(|e| AutopropError::internal(format!("failed to serialize diagnostics: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Diagnostic {
        Diagnostic::new(
            "simplification/use-auto-property",
            Severity::Info,
            RuleCategory::Simplification,
            "Property 'Value' can be converted to a getter-only auto-property",
            Span { start: 24, end: 29 },
            "Value",
        )
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn human_rendering_resolves_line_and_column() {
        let source = "class C {\n    int X { get; }\n}\n";
        // offset 14 is the `int` on line 2, column 5
        let diagnostic = Diagnostic {
            span: Span { start: 14, end: 17 },
            ..sample()
        };
        let rendered = render_human(&PathBuf::from("a.cs"), source, &[diagnostic]);
        assert_eq!(
            rendered,
            "a.cs:2:5 info[simplification/use-auto-property] Property 'Value' can be \
             converted to a getter-only auto-property\n"
        );
    }

    #[test]
    fn json_round_trip() {
        let diagnostic = sample();
        let json = render_json(std::slice::from_ref(&diagnostic)).unwrap();
        let back: Vec<Diagnostic> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![diagnostic]);
    }
}
