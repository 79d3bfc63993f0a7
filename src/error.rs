//! Unified error types for the HUD.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading, parsing, or persisting configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors from the backend HTTP API layer.
#[derive(Debug)]
pub enum ApiError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the backend.
    Status { code: u16, body: String },
    /// The backend answered with a payload we could not interpret.
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code when this error came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, body } if body.is_empty() => write!(f, "status {code}"),
            Self::Status { code, body } => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// TelemetryError
// ---------------------------------------------------------------------------

/// Errors on the telemetry push channel.
///
/// Every variant means "link lost" to the telemetry session; none is fatal.
#[derive(Debug)]
pub enum TelemetryError {
    /// Could not open the subscription.
    Connect(String),
    /// The publisher rejected the subscription.
    Status(u16),
    /// The open stream failed mid-flight.
    Stream(String),
    /// The publisher ended the stream.
    Closed,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(msg) => write!(f, "connect: {msg}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Stream(msg) => write!(f, "stream: {msg}"),
            Self::Closed => write!(f, "stream closed by publisher"),
        }
    }
}

impl std::error::Error for TelemetryError {}

impl From<reqwest::Error> for TelemetryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Connect(e.to_string())
        } else {
            Self::Stream(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// VoiceError
// ---------------------------------------------------------------------------

/// Errors from speech capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// No recognizer is available on this host.
    Unsupported,
    /// The recognizer ran but produced no usable transcript.
    Recognition { code: String },
}

impl VoiceError {
    /// Short machine-style code surfaced in the `Voice error: <code>` toast.
    pub fn code(&self) -> &str {
        match self {
            Self::Unsupported => "not-supported",
            Self::Recognition { code } => code,
        }
    }
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "voice input is not supported on this host"),
            Self::Recognition { code } => write!(f, "recognition failed: {code}"),
        }
    }
}

impl std::error::Error for VoiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn api_status_error_display_omits_empty_body() {
        let bare = ApiError::Status {
            code: 502,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "status 502");
        assert_eq!(bare.status_code(), Some(502));

        let detailed = ApiError::Status {
            code: 500,
            body: "boom".into(),
        };
        assert_eq!(detailed.to_string(), "status 500: boom");
    }

    #[test]
    fn telemetry_error_display_variants() {
        assert_eq!(TelemetryError::Status(503).to_string(), "status 503");
        assert_eq!(
            TelemetryError::Stream("eof".into()).to_string(),
            "stream: eof"
        );
    }

    #[test]
    fn voice_error_codes() {
        assert_eq!(VoiceError::Unsupported.code(), "not-supported");
        let e = VoiceError::Recognition {
            code: "no-speech".into(),
        };
        assert_eq!(e.code(), "no-speech");
        assert_eq!(e.to_string(), "recognition failed: no-speech");
    }
}
