use crate::error::{ErrorKind, Result};
use crate::transport::Transport;
use exn::ResultExt;
use std::io::Read;
use tracing::instrument;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Plain HTTP(S) transport backed by a `ureq` agent.
///
/// No timeouts are configured beyond `ureq`'s own defaults; a slow mirror
/// blocks until it answers or the connection drops. Redirects are followed.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_agent(ureq::AgentBuilder::new().user_agent(USER_AGENT).build())
    }

    /// Use a preconfigured agent, for example one with timeouts or a proxy.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(status, size))]
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                tracing::Span::current().record("status", status);
                exn::bail!(ErrorKind::Status { url: url.to_string(), status });
            },
            Err(err) => {
                tracing::debug!(error = %err, "transport failure");
                exn::bail!(ErrorKind::Network(url.to_string()));
            },
        };
        tracing::Span::current().record("status", response.status());

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .or_raise(|| ErrorKind::Network(url.to_string()))?;
        tracing::Span::current().record("size", body.len());
        Ok(body)
    }
}
