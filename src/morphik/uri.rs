//! Parsing of Morphik connection URIs.

use crate::morphik::types::MorphikError;
use reqwest::Url;

/// Resolved HTTP endpoint and credentials for a Morphik deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub auth_token: Option<String>,
}

/// Parse a connection URI.
///
/// `morphik://<owner>:<token>@<host>[:port]` resolves to `https://host` (plain `http` for
/// local hosts) with `token` as bearer credential. `http(s)://` URLs are used as the base
/// directly.
pub fn parse_uri(uri: &str) -> Result<Endpoint, MorphikError> {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return Err(MorphikError::InvalidUri("URI is empty".into()));
    }
    let parsed = Url::parse(trimmed).map_err(|err| MorphikError::InvalidUri(err.to_string()))?;

    match parsed.scheme() {
        "morphik" => {
            let host = parsed
                .host_str()
                .filter(|host| !host.is_empty())
                .ok_or_else(|| MorphikError::InvalidUri("missing host".into()))?;
            let token = parsed
                .password()
                .filter(|token| !token.is_empty())
                .ok_or_else(|| MorphikError::InvalidUri("missing auth token".into()))?;
            let scheme = if is_local(host) { "http" } else { "https" };
            let base_url = match parsed.port() {
                Some(port) => format!("{scheme}://{host}:{port}"),
                None => format!("{scheme}://{host}"),
            };
            Ok(Endpoint {
                base_url,
                auth_token: Some(token.to_string()),
            })
        }
        "http" | "https" => {
            let auth_token = parsed
                .password()
                .filter(|token| !token.is_empty())
                .map(str::to_string);
            let mut base = parsed;
            base.set_username("")
                .and_then(|()| base.set_password(None))
                .map_err(|()| MorphikError::InvalidUri("cannot strip credentials".into()))?;
            let path = base.path().trim_end_matches('/').to_string();
            base.set_path(&path);
            Ok(Endpoint {
                base_url: base.as_str().trim_end_matches('/').to_string(),
                auth_token,
            })
        }
        other => Err(MorphikError::InvalidUri(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

fn is_local(host: &str) -> bool {
    host.contains("localhost") || host == "127.0.0.1"
}
