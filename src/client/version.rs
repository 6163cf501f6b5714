//! Protocol version resolution.
//!
//! WhatsApp Web publishes its current client revision inside the
//! service-worker bootstrap of the web page; [`WebVersionResolver`] scrapes
//! it from there. When the lookup fails the bot falls back to
//! [`FALLBACK_VERSION`] rather than refusing to start.

use super::http::{HttpClient, HttpRequest};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Page carrying the `client_revision` field.
pub const WEB_CLIENT_URL: &str = "https://web.whatsapp.com/";

/// Known-good version used when the live lookup fails.
pub const FALLBACK_VERSION: ProtocolVersion = ProtocolVersion {
    primary: 2,
    secondary: 3000,
    tertiary: 1026131876,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    pub primary: u32,
    pub secondary: u32,
    pub tertiary: u32,
}

impl From<(u32, u32, u32)> for ProtocolVersion {
    fn from((primary, secondary, tertiary): (u32, u32, u32)) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.primary, self.secondary, self.tertiary)
    }
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version endpoint returned status {0}")]
    Status(u16),

    #[error("client_revision not found in web payload")]
    MissingRevision,

    #[error("http error: {0}")]
    Http(#[from] anyhow::Error),
}

#[async_trait]
pub trait VersionResolver: Send + Sync {
    async fn fetch_latest_version(&self) -> Result<ProtocolVersion, VersionError>;
}

/// Resolver pinned to one version, for deployments that do not want a
/// network lookup at startup.
#[derive(Debug, Clone)]
pub struct StaticVersionResolver {
    version: ProtocolVersion,
}

impl StaticVersionResolver {
    pub fn new(version: impl Into<ProtocolVersion>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl VersionResolver for StaticVersionResolver {
    async fn fetch_latest_version(&self) -> Result<ProtocolVersion, VersionError> {
        Ok(self.version)
    }
}

/// Resolves the current version from the WhatsApp Web page.
pub struct WebVersionResolver {
    http: Arc<dyn HttpClient>,
}

impl WebVersionResolver {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl VersionResolver for WebVersionResolver {
    async fn fetch_latest_version(&self) -> Result<ProtocolVersion, VersionError> {
        let response = self
            .http
            .execute(HttpRequest {
                url: WEB_CLIENT_URL.to_string(),
            })
            .await?;

        if response.status_code != 200 {
            return Err(VersionError::Status(response.status_code));
        }

        let body = String::from_utf8_lossy(&response.body);
        let revision = parse_client_revision(&body).ok_or(VersionError::MissingRevision)?;
        Ok(ProtocolVersion {
            primary: 2,
            secondary: 3000,
            tertiary: revision,
        })
    }
}

// The field sits inside a JS string on the live page, so it may arrive
// with escaped quotes (`\"client_revision\":123`). Tolerate both forms.
fn parse_client_revision(body: &str) -> Option<u32> {
    const MARKER: &str = "client_revision";
    let rest = &body[body.find(MARKER)? + MARKER.len()..];
    let rest = rest.trim_start_matches(['\\', '"', ':', ' ']);
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
