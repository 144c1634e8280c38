use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use url::form_urlencoded;

use crate::{TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

pub(crate) const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";

/// Token pair extracted from a provider response.
///
/// Providers may return metadata beyond the two required keys; those pairs
/// are kept in [`remain`](TokenResponse::remain) rather than dropped.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl TokenResponse {
    /// Whether the provider confirmed the callback, i.e. answered
    /// `oauth_callback_confirmed=true` and therefore speaks revision 1.0a.
    pub fn callback_confirmed(&self) -> bool {
        self.remain
            .get(OAUTH_CALLBACK_CONFIRMED_KEY)
            .map(|v| v == "true")
            .unwrap_or(false)
    }
}

impl FromStr for TokenResponse {
    type Err = TokenReaderError;

    /// Parses an `application/x-www-form-urlencoded` response body,
    /// percent-decoding each `key=value` pair.
    fn from_str(body: &str) -> TokenReaderResult<Self> {
        let mut destructured: HashMap<String, String> = form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
        let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
        match (oauth_token, oauth_token_secret) {
            (Some(oauth_token), Some(oauth_token_secret)) => Ok(TokenResponse {
                oauth_token,
                oauth_token_secret,
                remain: destructured,
            }),
            (None, _) => Err(TokenReaderError::KeyNotFound(
                OAUTH_TOKEN_KEY,
                body.to_owned(),
            )),
            (_, _) => Err(TokenReaderError::KeyNotFound(
                OAUTH_TOKEN_SECRET_KEY,
                body.to_owned(),
            )),
        }
    }
}
