use std::borrow::Cow;

use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use url::{form_urlencoded, Url};

use crate::transport::HttpRequest;
use crate::{Secrets, SignError, SignResult, OAUTH_KEY_PREFIX};

/// Per-exchange OAuth parameters the provider hands to the signer.
///
/// The callback is set for leg one, the verifier for leg three; both ride in
/// the `Authorization` header, not in the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigningParams<'a> {
    pub callback: Option<&'a str>,
    pub verifier: Option<&'a str>,
}

/// Computes the `Authorization` header for an outgoing token request.
///
/// This is the seam between the provider and whatever produces signatures;
/// the provider never looks inside the returned value beyond checking that
/// it is a legal header.
pub trait RequestSigner {
    fn authorize(&self, request: &HttpRequest, params: &SigningParams<'_>) -> SignResult<String>;
}

impl<F> RequestSigner for F
where
    F: Fn(&HttpRequest, &SigningParams<'_>) -> SignResult<String>,
{
    fn authorize(&self, request: &HttpRequest, params: &SigningParams<'_>) -> SignResult<String> {
        self(request, params)
    }
}

/// HMAC-SHA1 signer backed by the `oauth1-request` crate.
///
/// Nonce and timestamp are normally generated per request; fixing them via
/// [`nonce`](HmacSigner::nonce) / [`timestamp`](HmacSigner::timestamp) makes
/// the output deterministic, which some providers' sandboxes and tests need.
#[derive(Debug, Clone)]
pub struct HmacSigner<'a> {
    secrets: Secrets<'a>,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
}

impl<'a> HmacSigner<'a> {
    pub fn new(secrets: Secrets<'a>) -> Self {
        HmacSigner {
            secrets,
            nonce: None,
            timestamp: None,
        }
    }

    /// Fixes the oauth_nonce value.
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        HmacSigner {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// Fixes the oauth_timestamp value.
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        HmacSigner {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    fn build_options(&'a self, params: &SigningParams<'a>, token: Option<&'a str>) -> Options<'a> {
        let mut options = Options::new();

        // NOTE: items must be added by alphabetical order

        if let Some(callback) = params.callback {
            options.callback(callback);
        }
        if let Some(ref nonce) = self.nonce {
            options.nonce(nonce.as_ref());
        }
        if let Some(timestamp) = self.timestamp {
            options.timestamp(timestamp);
        }
        if let Some(token) = token {
            options.token(token);
        }
        if let Some(verifier) = params.verifier {
            options.verifier(verifier);
        }

        options
    }
}

impl RequestSigner for HmacSigner<'_> {
    fn authorize(&self, request: &HttpRequest, params: &SigningParams<'_>) -> SignResult<String> {
        let mut url = Url::parse(&request.uri().to_string())
            .map_err(|e| SignError::Computation(e.to_string()))?;
        let query = url.query().unwrap_or("").to_owned();
        url.set_query(None);

        let (consumer_key, consumer_secret) = self.secrets.consumer_key_pair();
        let (token, token_secret) = self.secrets.token_option_pair();
        let options = self.build_options(params, token);

        // destructure the query and sort by alphabetical order, with a
        // sentinel marking where the oauth_* block belongs
        let mut sorted_query: Vec<(Cow<str>, Cow<str>)> =
            form_urlencoded::parse(query.as_bytes()).collect();
        sorted_query.push((Cow::from(OAUTH_KEY_PREFIX), Cow::from("")));
        sorted_query.sort();

        let mut divided = sorted_query.splitn(2, |(key, _)| key == &OAUTH_KEY_PREFIX);
        let query_before_oauth = divided.next().unwrap_or_default();
        let query_after_oauth = divided.next().unwrap_or_default();

        // token exchanges carry their parameters in the query, so sign
        // query-style whenever one is present and form-style otherwise
        let mut signer = if query.is_empty() {
            OAuthSigner::form_with_signature_method(
                HmacSha1,
                request.method().as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        } else {
            OAuthSigner::with_signature_method(
                HmacSha1,
                request.method().as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        };

        for (key, value) in query_before_oauth {
            if !key.starts_with(OAUTH_KEY_PREFIX) {
                signer.parameter(key, value);
            }
        }
        let mut signer = signer.oauth_parameters(consumer_key, &options);
        for (key, value) in query_after_oauth {
            if !key.starts_with(OAUTH_KEY_PREFIX) {
                signer.parameter(key, value);
            }
        }

        Ok(signer.finish().authorization)
    }
}
