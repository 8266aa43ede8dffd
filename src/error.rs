use thiserror::Error;

/// Result type alias for aero data operations
pub type Result<T> = std::result::Result<T, AeroError>;

/// Errors that can occur when working with flight model data files
#[derive(Debug, Error)]
pub enum AeroError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token could not be interpreted as the value the section expects
    #[error("Format error at line {line} (token {offset}, {section}): {message}")]
    Format {
        /// 1-based source line of the offending token
        line: usize,
        /// Token offset within the stream
        offset: usize,
        /// Section being read
        section: &'static str,
        /// Error message
        message: String,
    },

    /// The reader ran past the end of the token stream
    #[error("Unexpected end of data at token {offset} ({section}): document has {len} tokens")]
    OutOfRange {
        /// Token offset that was requested
        offset: usize,
        /// Number of tokens in the document
        len: usize,
        /// Section being read
        section: &'static str,
    },

    /// A marker phrase needed to slice the original document is missing
    #[error("Marker not found in original content: \"{0}\"")]
    MissingMarker(&'static str),

    /// Breakpoint value cannot be inserted
    #[error("Invalid breakpoint: {0}")]
    InvalidBreakpoint(f64),

    /// Table dimensions disagree with their breakpoints
    #[error("Inconsistent table {table}: {message}")]
    InconsistentTable {
        /// Table name
        table: &'static str,
        /// Error message
        message: String,
    },
}

impl AeroError {
    /// Create a format error with context
    pub fn format<S: Into<String>>(
        line: usize,
        offset: usize,
        section: &'static str,
        message: S,
    ) -> Self {
        AeroError::Format {
            line,
            offset,
            section,
            message: message.into(),
        }
    }

    /// Create an inconsistent table error
    pub fn inconsistent<S: Into<String>>(table: &'static str, message: S) -> Self {
        AeroError::InconsistentTable {
            table,
            message: message.into(),
        }
    }
}
