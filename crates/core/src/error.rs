// Error handling for the mpv bridge

use std::fmt;

/// Bridge error types
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// The engine could not be constructed or initialized
    Initialization(String),

    /// The engine rejected a command, option or property
    Engine(String),

    /// An argument could not be passed across the C boundary
    InvalidArgument(String),

    /// JNI error (string conversion, environment access)
    Jni(String),

    /// Generic error
    Other(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BridgeError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            BridgeError::Engine(msg) => write!(f, "Engine error: {}", msg),
            BridgeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BridgeError::Jni(msg) => write!(f, "JNI error: {}", msg),
            BridgeError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for BridgeError {
    fn from(err: jni::errors::Error) -> Self {
        BridgeError::Jni(err.to_string())
    }
}

impl From<std::ffi::NulError> for BridgeError {
    fn from(err: std::ffi::NulError) -> Self {
        BridgeError::InvalidArgument(format!("interior nul byte at {}", err.nul_position()))
    }
}
