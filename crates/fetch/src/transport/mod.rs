//! How Contents files get off the mirror.
//!
//! [`Transport`] is the seam between the fetcher and the network: the
//! fetcher only ever asks for the full body behind a URL. [`HttpTransport`]
//! does that with `ureq`; [`MockTransport`] (behind the `mock` feature)
//! serves canned responses for tests.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockTransport;
use crate::error::Result;

/// A blocking source of remote files.
///
/// Implementations return the complete response body for a successful
/// (2xx) request. Any other status must be reported as
/// [`ErrorKind::Status`](crate::error::ErrorKind::Status), and failures to
/// connect or read the body as
/// [`ErrorKind::Network`](crate::error::ErrorKind::Network). Implementations
/// never retry.
///
/// # Examples
///
/// ```
/// use debstat_fetch::error::Result;
/// use debstat_fetch::transport::Transport;
///
/// fn size_of(transport: &dyn Transport, url: &str) -> Result<usize> {
///     Ok(transport.get(url)?.len())
/// }
/// ```
pub trait Transport {
    /// Name of the transport, for logging only.
    fn name(&self) -> &str;

    /// Download the full body behind `url`.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}
