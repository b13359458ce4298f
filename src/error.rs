use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoilforgeError {
    /// A numeric or structural parameter is out of range (e.g. spacing not
    /// greater than wire width, malformed region padding list).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A named object (coil, cylinder, box, specimen, variable, setup) was
    /// registered twice. Names are permanent for the session.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// An operation referenced a coil, specimen, variable, or material that
    /// was never registered.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An ordering dependency is unmet (excitation before coil, setup before
    /// region, sweep before setup/variable).
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// An excitation or setup was requested under the wrong solver mode.
    #[error("Solver mode mismatch: {0}")]
    ModeMismatch(String),

    /// Sweep-table parse failure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Opaque failure propagated from the CAD/solver backend.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoilforgeError>;
