/*!
oauth1-provider: the three-legged OAuth 1.0a handshake, one provider at a time.

# Overview

This library drives the consumer side of the OAuth 1.0a token exchange:
obtain an unauthorized request token, send the user off to authorize it, then
trade the authorized token for an access token. The protocol logic is pinned
to a small [`Transport`] trait, so the bundled [`ReqwestTransport`] (blocking
[reqwest](https://crates.io/crates/reqwest)) can be swapped for any other HTTP
stack, or for a scripted double in tests, without touching the handshake.

Signature computation is likewise behind a trait: [`RequestSigner`] consumes a
prepared request and produces the `Authorization` header. [`HmacSigner`]
implements it with HMAC-SHA1 via
[oauth1-request](https://crates.io/crates/oauth1-request); any plain function
with the right shape works too.

# How to use

```no_run
use oauth1_provider::{HmacSigner, Provider, Secrets, OUT_OF_BAND};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider = Provider::new(
        "https://api.example.com/oauth/request_token",
        "https://api.example.com/oauth/access_token",
        "https://api.example.com/oauth/authorize",
    )?;

    // leg 1: acquire the request token & token secret
    let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
    let signer = HmacSigner::new(secrets);
    let request_token = provider.retrieve_request_token(&signer, OUT_OF_BAND, &[])?;

    // leg 2: let the user authorize it and collect the verifier pin
    println!(
        "please access to: {}",
        provider.authorize_url(&request_token.oauth_token)
    );
    let pin = "[VERIFIER]";

    // leg 3: exchange it for the access token
    let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
        .token(request_token.oauth_token, request_token.oauth_token_secret);
    let signer = HmacSigner::new(secrets);
    let access_token = provider.retrieve_access_token(&signer, Some(pin), &[])?;

    println!(
        "your token and secret is: \n token: {}\n secret: {}",
        access_token.oauth_token, access_token.oauth_token_secret
    );
    println!("other attributes: {:#?}", access_token.remain);
    Ok(())
}
```

Providers that want `POST` token exchanges:

```no_run
# use oauth1_provider::Provider;
# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut provider = Provider::new(
    "https://api.example.com/oauth/request_token",
    "https://api.example.com/oauth/access_token",
    "https://api.example.com/oauth/authorize",
)?;
provider.set_request_method("POST");
# Ok(())
# }
```

Failures are classified, not flattened: a non-success answer is
[`RejectionError`] with the exact status and raw body, a success answer
missing a token field is [`TokenReaderError`], and transport trouble splits
into construction versus I/O. Nothing is retried internally; retry policy
belongs to the caller.
*/
mod error;
mod provider;
mod secrets;
mod signer;
mod token_reader;
mod transport;
mod transport_reqwest;

// exposed to external program
pub use error::{
    Error, RejectionError, Result, SignError, SignResult, TokenReaderError, TokenReaderResult,
    TransportError, TransportResult,
};
pub use provider::Provider;
pub use secrets::Secrets;
pub use signer::{HmacSigner, RequestSigner, SigningParams};
pub use token_reader::TokenResponse;
pub use transport::{Exchange, HttpRequest, HttpResponse, Transport};
pub use transport_reqwest::ReqwestTransport;

// exposed constant variables
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Callback value for pin-based, out-of-band authorization.
pub const OUT_OF_BAND: &str = "oob";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
