// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// Transport-level failure (connection refused, timeout, TLS).
    Network(String),
    /// The listing or rendition service answered with a non-success status.
    Http {
        status: u16,
    },
    /// The response body could not be decoded.
    Decode(String),
    InvalidUrl(String),
}

impl Error {
    /// Returns the i18n message key used when this error is shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Network(_) => "error-network",
            Error::Http { .. } => "error-http-status",
            Error::Decode(_) => "error-decode",
            Error::InvalidUrl(_) => "error-invalid-url",
        }
    }

    /// Returns `true` for failures that a retry has a reasonable chance of fixing.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Http { status } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Http { status } => write!(f, "HTTP Error: status {}", status),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::Http {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else if err.is_builder() {
            Error::InvalidUrl(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn http_error_displays_status() {
        let err = Error::Http { status: 502 };
        assert_eq!(format!("{}", err), "HTTP Error: status 502");
    }

    #[test]
    fn json_error_maps_to_decode() {
        let parse = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn transient_classification() {
        assert!(Error::Network("refused".into()).is_transient());
        assert!(Error::Http { status: 503 }.is_transient());
        assert!(Error::Http { status: 429 }.is_transient());
        assert!(!Error::Http { status: 404 }.is_transient());
        assert!(!Error::Decode("eof".into()).is_transient());
    }

    #[test]
    fn i18n_keys_are_distinct() {
        let keys = [
            Error::Io(String::new()).i18n_key(),
            Error::Config(String::new()).i18n_key(),
            Error::Network(String::new()).i18n_key(),
            Error::Http { status: 500 }.i18n_key(),
            Error::Decode(String::new()).i18n_key(),
            Error::InvalidUrl(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
