use std::fmt;

#[derive(Debug)]
pub enum MergeError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no sections, threshold out of range, etc.).
    ConfigValidation(String),
    /// A record in an OCR section dump failed validation.
    RecordParse { section: String, index: usize, reason: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::RecordParse { section, index, reason } => {
                write!(f, "section '{section}', record {index}: {reason}")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
