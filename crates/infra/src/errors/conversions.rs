//! Conversions from external infrastructure errors into domain errors.

use fieldpulse_domain::FieldPulseError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FieldPulseError);

impl From<InfraError> for FieldPulseError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FieldPulseError> for InfraError {
    fn from(value: FieldPulseError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFieldPulseError {
    fn into_fieldpulse(self) -> FieldPulseError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FieldPulseError */
/* -------------------------------------------------------------------------- */

impl IntoFieldPulseError for HttpError {
    fn into_fieldpulse(self) -> FieldPulseError {
        if self.is_timeout() {
            return FieldPulseError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return FieldPulseError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return FieldPulseError::InvalidInput(format!("malformed HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => FieldPulseError::Auth(message),
                404 => FieldPulseError::NotFound(message),
                429 => FieldPulseError::Network(message),
                400..=499 => FieldPulseError::InvalidInput(message),
                _ => FieldPulseError::Network(message),
            };
        }

        FieldPulseError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_fieldpulse())
    }
}

/* -------------------------------------------------------------------------- */
/* Config parsing errors → FieldPulseError */
/* -------------------------------------------------------------------------- */

impl IntoFieldPulseError for serde_json::Error {
    fn into_fieldpulse(self) -> FieldPulseError {
        FieldPulseError::Config(format!("Invalid JSON format: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_fieldpulse())
    }
}

impl IntoFieldPulseError for toml::de::Error {
    fn into_fieldpulse(self) -> FieldPulseError {
        FieldPulseError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_fieldpulse())
    }
}

impl IntoFieldPulseError for std::io::Error {
    fn into_fieldpulse(self) -> FieldPulseError {
        FieldPulseError::Config(format!("Failed to read config file: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_fieldpulse())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
