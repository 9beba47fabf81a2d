//! Transport for signed requests backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use tiktokshop_core::{Error, HttpSend, Result};

/// HttpSend implementation that delivers requests with a [`reqwest::Client`].
///
/// Connection pooling, timeouts and TLS settings belong to the wrapped
/// client; configure them with [`reqwest::ClientBuilder`] and pass the result
/// to [`ReqwestHttpSend::new`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(e)
        })?;
        debug!("sending {} {}", req.method(), req.url().path());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiktokshop_core::ErrorKind;

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let send = ReqwestHttpSend::default();
        // Port 9 (discard) on localhost is not expected to accept connections.
        let req = http::Request::get("http://127.0.0.1:9/")
            .body(Bytes::new())
            .expect("request must build");

        let err = send.http_send(req).await.expect_err("must fail to connect");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_retryable());
    }
}
