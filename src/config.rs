//! SMTP configuration
//!
//! Holds the connection credentials for an SMTP relay and the validation
//! rules applied before a transport is built from them.

use serde::{Deserialize, Serialize};

use crate::error::MailError;

/// Port on which SMTP runs over implicit TLS (SMTPS)
pub const SMTPS_PORT: u16 = 465;

/// SMTP relay configuration
///
/// # Examples
///
/// ```rust
/// use maildrop::SmtpConfig;
///
/// let config = SmtpConfig::new("smtp.example.com", 587, "user@example.com", "secret");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port (usually 587 for STARTTLS, 465 for implicit TLS)
    pub port: u16,

    /// SMTP username, also used as the From address on outgoing mail
    pub user: String,

    /// SMTP password
    pub pass: String,
}

impl SmtpConfig {
    /// Create a new SMTP configuration
    pub fn new<H, U, P>(host: H, port: u16, user: U, pass: P) -> Self
    where
        H: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// Create SMTP configuration from environment variables
    ///
    /// Expects the following environment variables:
    /// - `SMTP_HOST`: SMTP server hostname
    /// - `SMTP_PORT`: SMTP server port (default: 587)
    /// - `SMTP_USER`: SMTP username
    /// - `SMTP_PASS`: SMTP password
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if a required variable is missing
    /// or the port is not a valid number
    pub fn from_env() -> Result<Self, MailError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| MailError::config("SMTP_HOST environment variable not set"))?;

        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| MailError::config("SMTP_PORT must be a valid port number"))?;

        let user = std::env::var("SMTP_USER")
            .map_err(|_| MailError::config("SMTP_USER environment variable not set"))?;

        let pass = std::env::var("SMTP_PASS")
            .map_err(|_| MailError::config("SMTP_PASS environment variable not set"))?;

        Ok(Self {
            host,
            port,
            user,
            pass,
        })
    }

    /// Validate the configuration
    ///
    /// Host, user, and password must be non-empty and the port must be
    /// non-zero. The upper port bound is carried by the `u16` type.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` naming the offending field
    pub fn validate(&self) -> Result<(), MailError> {
        if self.host.is_empty() {
            return Err(MailError::config("SMTP host must not be empty"));
        }

        if self.port == 0 {
            return Err(MailError::config("SMTP port must be between 1 and 65535"));
        }

        if self.user.is_empty() {
            return Err(MailError::config("SMTP user must not be empty"));
        }

        if self.pass.is_empty() {
            return Err(MailError::config("SMTP password must not be empty"));
        }

        Ok(())
    }

    /// Whether the connection uses implicit TLS
    ///
    /// True when and only when the port is 465. Every other port uses
    /// opportunistic STARTTLS. This is a fixed rule, not a negotiated
    /// capability.
    #[must_use]
    pub const fn implicit_tls(&self) -> bool {
        self.port == SMTPS_PORT
    }
}
