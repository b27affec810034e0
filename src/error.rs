use thiserror::Error;

/// Custom error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sensor subsystem unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a sensor unavailable error
    pub fn sensor_unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::SensorUnavailable(msg.into())
    }

    /// Create a display error
    pub fn display<S: Into<String>>(msg: S) -> Self {
        MonitorError::Display(msg.into())
    }

    pub fn input<S: Into<String>>(msg: S) -> Self {
        MonitorError::Input(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        MonitorError::Runtime(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MonitorError::Other(msg.into())
    }
}
