use http::header::{HeaderValue, AUTHORIZATION};
use url::Url;

use crate::signer::{RequestSigner, SigningParams};
use crate::token_reader::TokenResponse;
use crate::transport::{Exchange, Transport};
use crate::transport_reqwest::ReqwestTransport;
use crate::{RejectionError, Result, SignError, TransportError, OAUTH_TOKEN_KEY};

/// Drives the three legs of the OAuth 1.0a handshake against one service
/// provider.
///
/// The three endpoint URLs are parsed at construction and never change.
/// Each retrieval is one signed blocking round trip; the connection is
/// released on every exit path, and no token state is kept across calls, so
/// a single instance can serve any number of sequential exchanges.
#[derive(Debug)]
pub struct Provider<T = ReqwestTransport> {
    request_token_endpoint: Url,
    access_token_endpoint: Url,
    authorization_endpoint: Url,
    transport: T,
}

impl Provider<ReqwestTransport> {
    /// Builds a provider over the bundled reqwest transport.
    pub fn new(
        request_token_url: &str,
        access_token_url: &str,
        authorization_url: &str,
    ) -> Result<Self> {
        Provider::with_transport(
            request_token_url,
            access_token_url,
            authorization_url,
            ReqwestTransport::new()?,
        )
    }

    /// Replaces the request method used by the bundled transport.
    ///
    /// The default is `GET`; blank values are ignored. See
    /// [`ReqwestTransport::set_request_method`].
    pub fn set_request_method(&mut self, method: &str) {
        self.transport.set_request_method(method);
    }
}

impl<T> Provider<T>
where
    T: Transport,
{
    /// Builds a provider over a caller-supplied transport.
    pub fn with_transport(
        request_token_url: &str,
        access_token_url: &str,
        authorization_url: &str,
        transport: T,
    ) -> Result<Self> {
        Ok(Provider {
            request_token_endpoint: parse_endpoint(request_token_url)?,
            access_token_endpoint: parse_endpoint(access_token_url)?,
            authorization_endpoint: parse_endpoint(authorization_url)?,
            transport,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Leg one: obtains an unauthorized request token.
    ///
    /// `callback` is where the provider sends the user after authorization;
    /// pass [`OUT_OF_BAND`](crate::OUT_OF_BAND) for pin-based flows. `extra`
    /// pairs are appended to the endpoint query, covered by the signature and
    /// sent to the provider verbatim.
    pub fn retrieve_request_token(
        &self,
        signer: &impl RequestSigner,
        callback: &str,
        extra: &[(&str, &str)],
    ) -> Result<TokenResponse> {
        let endpoint = extend_query(&self.request_token_endpoint, extra);
        let params = SigningParams {
            callback: Some(callback),
            verifier: None,
        };
        self.retrieve_token(signer, &endpoint, &params)
    }

    /// Leg two: the URL to send the user to.
    ///
    /// Pure composition of the authorization endpoint and the request token;
    /// no network call is made.
    pub fn authorize_url(&self, request_token: &str) -> String {
        let mut url = self.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair(OAUTH_TOKEN_KEY, request_token);
        url.into()
    }

    /// Leg three: exchanges the authorized request token for an access token.
    ///
    /// The request token pair rides in the signer's credentials; `verifier`
    /// is the code the provider issued on authorization, if it demands one.
    pub fn retrieve_access_token(
        &self,
        signer: &impl RequestSigner,
        verifier: Option<&str>,
        extra: &[(&str, &str)],
    ) -> Result<TokenResponse> {
        let endpoint = extend_query(&self.access_token_endpoint, extra);
        let params = SigningParams {
            callback: None,
            verifier,
        };
        self.retrieve_token(signer, &endpoint, &params)
    }

    /// One signed round trip: create, sign, send, parse. The [`Exchange`]
    /// guard releases the connection exactly once on every path out of here.
    fn retrieve_token(
        &self,
        signer: &impl RequestSigner,
        endpoint: &Url,
        params: &SigningParams<'_>,
    ) -> Result<TokenResponse> {
        let request = self.transport.create_request(endpoint)?;
        let mut exchange = Exchange::new(&self.transport, request);

        let authorization = signer.authorize(exchange.request(), params)?;
        let authorization = HeaderValue::from_str(&authorization)
            .map_err(|_| SignError::InvalidHeader(authorization.clone()))?;
        exchange
            .request_mut()
            .headers_mut()
            .insert(AUTHORIZATION, authorization);

        let response = exchange.send()?;
        let status = response.status();
        let body = String::from_utf8_lossy(response.body()).into_owned();

        if !status.is_success() {
            return Err(RejectionError {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(body.parse()?)
    }
}

fn parse_endpoint(url: &str) -> std::result::Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::Construction(e.into()))
}

fn extend_query(endpoint: &Url, extra: &[(&str, &str)]) -> Url {
    if extra.is_empty() {
        return endpoint.clone();
    }
    let mut endpoint = endpoint.clone();
    endpoint.query_pairs_mut().extend_pairs(extra.iter().copied());
    endpoint
}
