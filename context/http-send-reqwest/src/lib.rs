//! Reqwest-backed [`HttpSend`] implementation for the gigya client.
//!
//! The Socialize API is a single request/response exchange per call, so this
//! adapter does nothing beyond executing the prepared request and collecting
//! the body. Connection pooling and TLS configuration stay inside the
//! supplied [`reqwest::Client`].

use async_trait::async_trait;
use bytes::Bytes;
use gigya_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::Client;

/// HttpSend implementation backed by a [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a customized reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = reqwest::Request::try_from(req)
            .map_err(|e| Error::connection("failed to build transport request").with_source(e))?;

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::connection("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::connection("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
