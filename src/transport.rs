use url::Url;

use crate::TransportResult;

/// A transport-neutral outgoing request.
pub type HttpRequest = http::Request<Vec<u8>>;

/// A transport-neutral incoming response.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Binding of the token exchange to one concrete HTTP mechanism.
///
/// The provider depends only on this trait, so a connection-based client, a
/// streaming client or a scripted test double can be substituted without
/// touching the protocol logic.
pub trait Transport {
    /// Builds a request targeting `endpoint` with the transport's configured
    /// method.
    fn create_request(&self, endpoint: &Url) -> TransportResult<HttpRequest>;

    /// Performs one blocking round trip.
    fn send_request(&self, request: &HttpRequest) -> TransportResult<HttpResponse>;

    /// Releases whatever resources the exchange holds.
    ///
    /// Must be idempotent and must not panic, even when the exchange never
    /// produced a response.
    fn close_connection(&self, request: &HttpRequest, response: Option<&HttpResponse>);
}

/// Scoped view of one request/response exchange.
///
/// Dropping the value invokes [`Transport::close_connection`] exactly once,
/// whatever the exit path. [`release`](Exchange::release) may also be called
/// explicitly; repeated calls are no-ops.
pub struct Exchange<'t, T>
where
    T: Transport + ?Sized,
{
    transport: &'t T,
    request: HttpRequest,
    response: Option<HttpResponse>,
    released: bool,
}

impl<'t, T> Exchange<'t, T>
where
    T: Transport + ?Sized,
{
    pub fn new(transport: &'t T, request: HttpRequest) -> Self {
        Exchange {
            transport,
            request,
            response: None,
            released: false,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut HttpRequest {
        &mut self.request
    }

    /// Submits the request and keeps the response inside the guard so it is
    /// covered by the release on drop.
    pub fn send(&mut self) -> TransportResult<&HttpResponse> {
        let response = self.transport.send_request(&self.request)?;
        Ok(self.response.insert(response))
    }

    /// Releases the connection now instead of at drop time.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.transport
            .close_connection(&self.request, self.response.as_ref());
    }
}

impl<'t, T> Drop for Exchange<'t, T>
where
    T: Transport + ?Sized,
{
    fn drop(&mut self) {
        self.release();
    }
}
