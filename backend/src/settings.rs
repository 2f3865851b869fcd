//! Application settings loaded once at start-up via OrthoConfig.
//!
//! Values come from CLI flags, `PANTRY_*` environment variables and an
//! optional config file. Unset fields fall back to the defaults exposed by the
//! accessor methods, and [`AppSettings::identity_mode`] decides which token
//! verifier the server runs with.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{UserId, UserIdValidationError};
use crate::outbound::persistence::redact_database_url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 5;

/// Whether the binary was compiled with debug assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Development build; stub identities are allowed.
    Debug,
    /// Release build; a real identity provider is mandatory.
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// How bearer tokens are verified.
#[derive(Clone, PartialEq, Eq)]
pub enum IdentityMode {
    /// Ask the identity provider's introspection endpoint.
    Introspection {
        /// Introspection endpoint.
        url: Url,
        /// Credential presented to the provider.
        secret: Zeroizing<String>,
        /// Per-request timeout.
        timeout: Duration,
    },
    /// Accept every token as this user. Debug builds only.
    Stub(UserId),
}

impl std::fmt::Debug for IdentityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Introspection { url, timeout, .. } => f
                .debug_struct("Introspection")
                .field("url", &url.as_str())
                .field("secret", &"<redacted>")
                .field("timeout", timeout)
                .finish(),
            Self::Stub(user_id) => f.debug_tuple("Stub").field(user_id).finish(),
        }
    }
}

/// Invalid or incomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("host {value:?} is not an IP address")]
    InvalidHost {
        /// The configured value.
        value: String,
    },
    /// The introspection URL does not parse.
    #[error("identity introspection URL {value:?} is invalid: {message}")]
    InvalidIntrospectionUrl {
        /// The configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// An introspection URL was given without the secret.
    #[error("identity introspection URL is set but the secret key is missing")]
    MissingIdentitySecret,
    /// A secret was given without an introspection URL.
    #[error("identity secret key is set but the introspection URL is missing")]
    MissingIntrospectionUrl,
    /// The stub user id is not a valid user id.
    #[error("stub user id is invalid: {0}")]
    InvalidStubUserId(#[from] UserIdValidationError),
    /// No identity provider is configured for this build.
    #[error("no identity provider configured; set the introspection URL and secret key")]
    NoIdentityProvider,
}

/// Settings for the pantry server.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct AppSettings {
    /// Address to bind, `0.0.0.0` by default.
    pub host: Option<String>,
    /// Port to bind, `3000` by default.
    pub port: Option<u16>,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// RFC 7662 token introspection endpoint.
    pub identity_introspection_url: Option<String>,
    /// Credential presented to the introspection endpoint.
    pub identity_secret_key: Option<String>,
    /// Seconds to wait for the identity provider.
    pub identity_timeout_secs: Option<u64>,
    /// Development identity accepted for any token.
    pub stub_user_id: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_deref().map(redact_database_url),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field(
                "identity_introspection_url",
                &self.identity_introspection_url,
            )
            .field(
                "identity_secret_key",
                &self.identity_secret_key.as_ref().map(|_| "<redacted>"),
            )
            .field("identity_timeout_secs", &self.identity_timeout_secs)
            .field("stub_user_id", &self.stub_user_id)
            .finish()
    }
}

impl AppSettings {
    /// Host to bind.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            value: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Database URL, when durable storage is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Maximum pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Identity provider request timeout.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_secs
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
        )
    }

    /// Decide how bearer tokens are verified.
    ///
    /// Introspection wins when both URL and secret are present. A stub user is
    /// only honoured in debug builds.
    ///
    /// # Errors
    /// Returns a [`SettingsError`] when the identity settings are incomplete,
    /// malformed, or leave a release build without a provider.
    pub fn identity_mode(&self, build: BuildMode) -> Result<IdentityMode, SettingsError> {
        let url = self
            .identity_introspection_url
            .as_deref()
            .filter(|value| !value.trim().is_empty());
        let secret = self
            .identity_secret_key
            .as_deref()
            .filter(|value| !value.is_empty());

        match (url, secret) {
            (Some(url), Some(secret)) => {
                let url = Url::parse(url).map_err(|err| SettingsError::InvalidIntrospectionUrl {
                    value: url.to_owned(),
                    message: err.to_string(),
                })?;
                Ok(IdentityMode::Introspection {
                    url,
                    secret: Zeroizing::new(secret.to_owned()),
                    timeout: self.identity_timeout(),
                })
            }
            (Some(_), None) => Err(SettingsError::MissingIdentitySecret),
            (None, Some(_)) => Err(SettingsError::MissingIntrospectionUrl),
            (None, None) => match (&self.stub_user_id, build) {
                (Some(raw), BuildMode::Debug) => Ok(IdentityMode::Stub(UserId::new(raw.as_str())?)),
                _ => Err(SettingsError::NoIdentityProvider),
            },
        }
    }
}
