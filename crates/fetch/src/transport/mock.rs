//! Canned-response transport for testing.

use crate::error::{ErrorKind, Result};
use crate::transport::Transport;
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned-response transport for testing.
///
/// Every URL without a registered response answers `404`. Requests are
/// recorded so tests can assert whether the network was touched at all.
///
/// # Examples
///
/// ```
/// use debstat_fetch::transport::{MockTransport, Transport};
///
/// let transport = MockTransport::default()
///     .with_body("http://mirror/Contents-all.gz", b"...".to_vec())
///     .with_status("http://mirror/Contents-amd64.gz", 503);
///
/// assert_eq!(transport.get("http://mirror/Contents-all.gz").unwrap(), b"...");
/// assert!(transport.get("http://mirror/Contents-amd64.gz").is_err());
/// assert!(transport.get("http://mirror/Contents-arm64.gz").is_err());
/// assert_eq!(transport.requests().len(), 3);
/// ```
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, std::result::Result<Vec<u8>, u16>>,
    requests: RefCell<Vec<String>>,
}

impl MockTransport {
    /// Answer `url` with a successful response carrying `body`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    /// Answer `url` with an unsuccessful HTTP status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Err(status));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => exn::bail!(ErrorKind::Status { url: url.to_string(), status: *status }),
            None => exn::bail!(ErrorKind::Status { url: url.to_string(), status: 404 }),
        }
    }
}
