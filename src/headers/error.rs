//! Error types that can occur during header related operation.

/// An error that can occur when exporting headers to a native header type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportError {
    /// Current environment provide no native header type.
    UnsupportedEnvironment,
    /// Native header type refused a header.
    Rejected {
        /// Name of the refused header.
        name: String,
    },
}

impl ExportError {
    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::UnsupportedEnvironment => "native header type is not available in this environment",
            Self::Rejected { .. } => "native header type rejected header",
        }
    }
}

impl std::error::Error for ExportError {}
impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedEnvironment => f.write_str(self.message()),
            Self::Rejected { name } => write!(f, "{} {name:?}", self.message()),
        }
    }
}
