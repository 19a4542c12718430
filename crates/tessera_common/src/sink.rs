//! Accumulator for recoverable input problems.
//!
//! Line-oriented parsers skip lines they cannot interpret. Each skipped line
//! is recorded here and logged at `warn` level, so callers can both inspect
//! what was dropped and keep going.

use std::fmt;
use std::sync::Mutex;

/// A recoverable problem found while reading an input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputWarning {
    /// A line did not have the expected number of fields, or a field did not parse.
    MalformedInputLine {
        /// Name of the input being parsed (usually the file name).
        source: String,
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A line carried a key the parser does not know.
    UnknownKey {
        /// Name of the input being parsed.
        source: String,
        /// 1-based line number.
        line: usize,
        /// The unrecognized key.
        key: String,
    },
    /// A hand-written placement holds a memory-tile count outside {1, 2, 4}.
    UnusualMemoryCount {
        /// Number of memory tiles placed.
        count: usize,
    },
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputWarning::MalformedInputLine {
                source,
                line,
                content,
                reason,
            } => write!(f, "{source}:{line}: skipped invalid line `{content}`: {reason}"),
            InputWarning::UnknownKey { source, line, key } => {
                write!(f, "{source}:{line}: ignored unknown key `{key}`")
            }
            InputWarning::UnusualMemoryCount { count } => {
                write!(f, "placement holds {count} memory tile(s), expected 1, 2 or 4")
            }
        }
    }
}

/// A thread-safe accumulator for [`InputWarning`]s.
pub struct WarningSink {
    warnings: Mutex<Vec<InputWarning>>,
}

impl WarningSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self {
            warnings: Mutex::new(Vec::new()),
        }
    }

    /// Records a warning and logs it.
    pub fn emit(&self, warning: InputWarning) {
        tracing::warn!("{warning}");
        self.lock().push(warning);
    }

    /// Number of warnings recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes all accumulated warnings, leaving the sink empty.
    pub fn take_all(&self) -> Vec<InputWarning> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a snapshot of all accumulated warnings without draining.
    pub fn warnings(&self) -> Vec<InputWarning> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<InputWarning>> {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for WarningSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(line: usize) -> InputWarning {
        InputWarning::MalformedInputLine {
            source: "tiles.txt".into(),
            line,
            content: "FFT fft 32".into(),
            reason: "expected 8 fields, found 3".into(),
        }
    }

    #[test]
    fn empty_sink() {
        let sink = WarningSink::new();
        assert!(sink.is_empty());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn emit_and_snapshot() {
        let sink = WarningSink::new();
        sink.emit(malformed(3));
        sink.emit(InputWarning::UnknownKey {
            source: "dse.txt".into(),
            line: 1,
            key: "FOO".into(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.warnings().len(), 2);
    }

    #[test]
    fn take_all_drains() {
        let sink = WarningSink::new();
        sink.emit(malformed(1));
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn display_memory_count() {
        let msg = InputWarning::UnusualMemoryCount { count: 3 }.to_string();
        assert_eq!(msg, "placement holds 3 memory tile(s), expected 1, 2 or 4");
    }

    #[test]
    fn display_malformed() {
        let msg = malformed(7).to_string();
        assert!(msg.starts_with("tiles.txt:7:"));
        assert!(msg.contains("expected 8 fields"));
    }
}
