//! Diagnostic sink for non-fatal findings.
//!
//! Records follow the error-file layout building simulation users expect: a
//! headline (`Severe`, `Warning`, `Message`, `Fatal`) followed by any number of
//! continuation lines. Every line is also emitted through `tracing`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Message,
    Warning,
    Severe,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Message => "Message",
            Severity::Warning => "Warning",
            Severity::Severe => "Severe",
            Severity::Fatal => "Fatal",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub continuations: Vec<String>,
}

impl Diagnostic {
    /// Append a continuation line.
    pub fn cont(&mut self, line: impl Into<String>) -> &mut Self {
        let line = line.into();
        tracing::debug!(severity = %self.severity, "   ~~~   {line}");
        self.continuations.push(line);
        self
    }

    /// Whether the headline or any continuation contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.continuations.iter().any(|c| c.contains(needle))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "** {:>7} ** {}", self.severity, self.message)?;
        for c in &self.continuations {
            write!(f, "\n**   ~~~   ** {c}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, message: String) -> &mut Diagnostic {
        match severity {
            Severity::Message => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Severe | Severity::Fatal => tracing::error!("{message}"),
        }
        self.records.push(Diagnostic {
            severity,
            message,
            continuations: Vec::new(),
        });
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    pub fn message(&mut self, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Severity::Message, message.into())
    }

    pub fn warning(&mut self, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Severity::Warning, message.into())
    }

    pub fn severe(&mut self, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Severity::Severe, message.into())
    }

    pub fn fatal(&mut self, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Severity::Fatal, message.into())
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.records.iter().filter(|r| r.severity == severity).count()
    }

    /// Records of one severity whose text mentions `needle`.
    pub fn find<'a>(
        &'a self,
        severity: Severity,
        needle: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.records
            .iter()
            .filter(move |r| r.severity == severity && r.mentions(needle))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
