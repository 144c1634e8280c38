use http::header::CONTENT_LENGTH;
use http::Method;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use url::Url;

use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{TransportError, TransportResult};

/// Issues token exchanges over reqwest's blocking client.
///
/// Redirect following is disabled: token endpoints answer directly rather
/// than delegating to another URI, and silently following one would hand the
/// signed request to a location it was not signed for. Token requests carry
/// an explicit `Content-Length: 0` since the exchange has no body of its own.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    method: Method,
}

impl ReqwestTransport {
    /// Builds a transport with a dedicated client.
    pub fn new() -> TransportResult<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| TransportError::Construction(e.into()))?;
        Ok(ReqwestTransport::with_client(client))
    }

    /// Wraps an existing client.
    ///
    /// Configure it to not follow redirects, as [`ReqwestTransport::new`]
    /// does.
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport {
            client,
            method: Method::GET,
        }
    }

    /// Replaces the method used for every subsequent request.
    ///
    /// The default is `GET`. The value is trimmed first; an empty or
    /// all-whitespace value is ignored and the previous method stays in
    /// effect, as does a value that is not a valid method token.
    pub fn set_request_method(&mut self, method: &str) {
        let trimmed = method.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Ok(method) = Method::from_bytes(trimmed.as_bytes()) {
            self.method = method;
        }
    }

    pub fn request_method(&self) -> &Method {
        &self.method
    }
}

impl Transport for ReqwestTransport {
    fn create_request(&self, endpoint: &Url) -> TransportResult<HttpRequest> {
        http::Request::builder()
            .method(self.method.clone())
            .uri(endpoint.as_str())
            .header(CONTENT_LENGTH, "0")
            .body(Vec::new())
            .map_err(|e| TransportError::Construction(e.into()))
    }

    fn send_request(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.uri().to_string())
            .headers(request.headers().clone());
        if !request.body().is_empty() {
            builder = builder.body(request.body().clone());
        }
        let response = builder
            .send()
            .map_err(|e| TransportError::Io(e.into()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Io(e.into()))?
            .to_vec();

        let mut wrapped = HttpResponse::new(body);
        *wrapped.status_mut() = status;
        *wrapped.headers_mut() = headers;
        Ok(wrapped)
    }

    fn close_connection(&self, _request: &HttpRequest, _response: Option<&HttpResponse>) {
        // send_request drains the body, which already returns the pooled
        // connection; nothing is left to tear down per exchange
    }
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;

    use super::*;

    #[test]
    fn request_carries_method_and_zero_length_marker() {
        let transport = ReqwestTransport::new().unwrap();
        let endpoint = Url::parse("https://provider.example/oauth/request_token").unwrap();
        let request = transport.create_request(&endpoint).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.headers().get(CONTENT_LENGTH).unwrap(),
            &http::HeaderValue::from_static("0")
        );
        assert!(request.body().is_empty());
    }

    #[test]
    fn method_override_semantics() {
        let mut transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.request_method(), &Method::GET);

        transport.set_request_method("  ");
        assert_eq!(transport.request_method(), &Method::GET);

        transport.set_request_method("POST");
        assert_eq!(transport.request_method(), &Method::POST);

        transport.set_request_method("");
        assert_eq!(transport.request_method(), &Method::POST);

        transport.set_request_method(" GET ");
        assert_eq!(transport.request_method(), &Method::GET);
    }

    #[test]
    fn round_trip_preserves_status_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/oauth/request_token");
            then.status(200)
                .header("content-type", "application/x-www-form-urlencoded")
                .body("oauth_token=abc&oauth_token_secret=def");
        });

        let transport = ReqwestTransport::new().unwrap();
        let endpoint = Url::parse(&server.url("/oauth/request_token")).unwrap();
        let request = transport.create_request(&endpoint).unwrap();
        let response = transport.send_request(&request).unwrap();
        transport.close_connection(&request, Some(&response));
        transport.close_connection(&request, Some(&response));

        mock.assert();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.body(), b"oauth_token=abc&oauth_token_secret=def");
    }

    #[test]
    fn full_handshake_against_a_mock_provider() {
        use crate::{HmacSigner, Provider, Secrets, OUT_OF_BAND};

        let server = MockServer::start();
        let request_leg = server.mock(|when, then| {
            when.method(POST)
                .path("/oauth/request_token")
                .header_exists("authorization");
            then.status(200)
                .header("content-type", "application/x-www-form-urlencoded")
                .body("oauth_token=req-abc&oauth_token_secret=req-xyz&oauth_callback_confirmed=true");
        });
        let access_leg = server.mock(|when, then| {
            when.method(POST)
                .path("/oauth/access_token")
                .header_exists("authorization");
            then.status(200)
                .header("content-type", "application/x-www-form-urlencoded")
                .body("oauth_token=acc-abc&oauth_token_secret=acc-xyz");
        });

        let mut provider = Provider::new(
            &server.url("/oauth/request_token"),
            &server.url("/oauth/access_token"),
            &server.url("/oauth/authorize"),
        )
        .unwrap();
        provider.set_request_method("POST");

        let signer = HmacSigner::new(Secrets::new("consumer-key", "consumer-secret"));
        let request_token = provider
            .retrieve_request_token(&signer, OUT_OF_BAND, &[])
            .unwrap();
        request_leg.assert();
        assert_eq!(request_token.oauth_token, "req-abc");
        assert!(request_token.callback_confirmed());

        let authorize = provider.authorize_url(&request_token.oauth_token);
        assert_eq!(
            authorize,
            server.url("/oauth/authorize?oauth_token=req-abc")
        );

        let secrets = Secrets::new("consumer-key", "consumer-secret").token(
            request_token.oauth_token,
            request_token.oauth_token_secret,
        );
        let signer = HmacSigner::new(secrets);
        let access_token = provider
            .retrieve_access_token(&signer, Some("verifier-pin"), &[])
            .unwrap();
        access_leg.assert();
        assert_eq!(access_token.oauth_token, "acc-abc");
        assert_eq!(access_token.oauth_token_secret, "acc-xyz");
    }

    #[test]
    fn rejection_passes_through_the_real_transport() {
        use crate::{Error, Provider, SignResult};
        use crate::signer::SigningParams;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/oauth/request_token");
            then.status(401).body("oauth_problem=consumer_key_rejected");
        });

        let provider = Provider::new(
            &server.url("/oauth/request_token"),
            &server.url("/oauth/access_token"),
            &server.url("/oauth/authorize"),
        )
        .unwrap();

        fn stub(_: &HttpRequest, _: &SigningParams<'_>) -> SignResult<String> {
            Ok(String::from("OAuth oauth_signature=\"stub\""))
        }

        match provider.retrieve_request_token(&stub, "oob", &[]) {
            Err(Error::Rejection(rejection)) => {
                assert_eq!(rejection.status, 401);
                assert_eq!(rejection.body, "oauth_problem=consumer_key_rejected");
            }
            other => panic!("expected rejection, got {:?}", other.map(|_| ())),
        }
        mock.assert();
    }

    #[test]
    fn network_failure_maps_to_io() {
        let transport = ReqwestTransport::new().unwrap();
        // a closed port, nothing listens here
        let endpoint = Url::parse("http://127.0.0.1:9/oauth/request_token").unwrap();
        let request = transport.create_request(&endpoint).unwrap();
        match transport.send_request(&request) {
            Err(TransportError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other.map(|_| ())),
        }
    }
}
