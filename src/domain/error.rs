//! Domain error types.

/// A record-level failure raised while turning a CSV line into a bar.
///
/// `line` is the 1-based line number in the source file (the header is line 1).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field `{field}` has value {value:?}, expected {kind}")]
    Coercion {
        line: u64,
        field: String,
        value: String,
        kind: &'static str,
    },

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: u64, field: String },
}

impl RecordError {
    pub fn line(&self) -> u64 {
        match self {
            RecordError::FieldCount { line, .. }
            | RecordError::Coercion { line, .. }
            | RecordError::MissingField { line, .. } => *line,
        }
    }
}

/// Top-level error type for barsim.
#[derive(Debug, thiserror::Error)]
pub enum BarsimError {
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] RecordError),

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BarsimError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        BarsimError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&BarsimError> for std::process::ExitCode {
    fn from(err: &BarsimError) -> Self {
        let code: u8 = match err {
            BarsimError::Io(_) | BarsimError::Csv { .. } => 1,
            BarsimError::ConfigParse { .. }
            | BarsimError::ConfigMissing { .. }
            | BarsimError::ConfigInvalid { .. } => 2,
            BarsimError::MalformedRecord(_) => 3,
        };
        std::process::ExitCode::from(code)
    }
}
