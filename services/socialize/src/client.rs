use crate::credential::Credential;
use crate::request::ApiCall;
use crate::sign_request::RequestSigner;
use bytes::Bytes;
use gigya_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use http::header::CONTENT_TYPE;
use std::sync::{Arc, Mutex};

/// A decoded API response.
///
/// The decoding decision is driven by the *request's* declared format, never
/// by response headers: `json` is parsed, everything else comes back as the
/// raw body text.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// A decoded `format=json` response.
    Json(serde_json::Value),
    /// The raw body text, for `format=xml` and friends.
    Text(String),
}

impl ApiResponse {
    /// The decoded JSON value, if this response was parsed as JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ApiResponse::Json(v) => Some(v),
            ApiResponse::Text(_) => None,
        }
    }

    /// The raw body text, if this response was passed through unparsed.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Json(_) => None,
            ApiResponse::Text(s) => Some(s),
        }
    }
}

/// Client dispatches signed Socialize API calls.
///
/// The credential is loaded lazily on the first call and cached for as long
/// as it stays valid. Everything else is per-call state, so one client can
/// serve any number of concurrent callers.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = Credential>>,
    signer: Arc<RequestSigner>,
    credential: Arc<Mutex<Option<Credential>>>,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, loader: impl ProvideCredential<Credential = Credential>) -> Self {
        Self {
            ctx,
            loader: Arc::new(loader),
            signer: Arc::new(RequestSigner::new()),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    async fn credential(&self) -> Result<Credential> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cached.is_valid() {
            cached
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        cred.ok_or_else(|| {
            Error::config_invalid(
                "no credential available: configure an api key with a secret key or oauth token",
            )
        })
    }

    /// Sign and dispatch `call`, decoding the response per its format.
    pub async fn send(&self, call: ApiCall) -> Result<ApiResponse> {
        let cred = self.credential().await?;
        let signed = self.signer.build(&call, &cred)?;

        log::debug!("dispatching {} to {}", call.method(), signed.url());

        let req = http::Request::post(signed.url())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Bytes::from(signed.body()))?;

        let resp = match signed.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, self.ctx.http_send(req))
                .await
                .map_err(|_| {
                    Error::connection(format!("request timed out after {timeout:?}"))
                })??,
            None => self.ctx.http_send(req).await?,
        };

        let body = String::from_utf8(resp.into_body().to_vec())
            .map_err(|e| Error::connection("response body is not valid utf-8").with_source(e))?;

        if signed.force_text() || signed.format() != "json" {
            return Ok(ApiResponse::Text(body));
        }

        let value = serde_json::from_str(&body)
            .map_err(|e| Error::connection("failed to decode json response").with_source(e))?;
        Ok(ApiResponse::Json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provide_credential::StaticCredentialProvider;
    use async_trait::async_trait;
    use gigya_core::{ErrorKind, HttpSend};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    /// Returns a canned body and records the request it saw.
    #[derive(Debug, Default)]
    struct MockHttpSend {
        body: &'static str,
        seen: Arc<Mutex<Option<http::Request<Bytes>>>>,
    }

    impl MockHttpSend {
        fn with_body(body: &'static str) -> (Self, Arc<Mutex<Option<http::Request<Bytes>>>>) {
            let seen = Arc::new(Mutex::new(None));
            (
                Self {
                    body,
                    seen: seen.clone(),
                },
                seen,
            )
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            *self.seen.lock().unwrap() = Some(req);
            Ok(http::Response::new(Bytes::from_static(
                self.body.as_bytes(),
            )))
        }
    }

    #[derive(Debug)]
    struct FailingHttpSend;

    #[async_trait]
    impl HttpSend for FailingHttpSend {
        async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            Err(Error::connection("connection refused"))
        }
    }

    fn client_with(http: impl HttpSend) -> Client {
        let ctx = Context::new().with_http_send(http);
        let loader = StaticCredentialProvider::new("key-1", "c2VjcmV0");
        Client::new(ctx, loader)
    }

    #[tokio::test]
    async fn test_send_decodes_json() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let (mock, seen) = MockHttpSend::with_body(r#"{"errorCode":0,"statusCode":200}"#);
        let client = client_with(mock);

        let resp = client.send(ApiCall::new("socialize.getUserInfo")?).await?;
        let json = resp.as_json().expect("json response expected");
        assert_eq!(json["errorCode"], 0);

        let req = seen.lock().unwrap().take().expect("request must be sent");
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(
            req.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            req.uri().to_string(),
            "http://socialize.gigya.com/socialize.getUserInfo"
        );
        let body = String::from_utf8(req.body().to_vec()).unwrap();
        assert!(body.contains("apiKey=key-1"));
        assert!(body.contains("sig="));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_xml_returns_text() -> Result<()> {
        let (mock, _) = MockHttpSend::with_body("<response><errorCode>0</errorCode></response>");
        let client = client_with(mock);

        let call = ApiCall::new("socialize.getUserInfo")?.param("format", "xml");
        let resp = client.send(call).await?;
        assert_eq!(
            resp.as_text(),
            Some("<response><errorCode>0</errorCode></response>")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_force_text_skips_json_decoding() -> Result<()> {
        let (mock, _) = MockHttpSend::with_body(r#"{"errorCode":0}"#);
        let client = client_with(mock);

        let resp = client
            .send(ApiCall::new("socialize.getUserInfo")?.force_text())
            .await?;
        assert_eq!(resp.as_text(), Some(r#"{"errorCode":0}"#));
        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_json_is_connection_error() -> Result<()> {
        let (mock, _) = MockHttpSend::with_body("not json at all");
        let client = client_with(mock);

        let err = client
            .send(ApiCall::new("socialize.getUserInfo")?)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert!(err.is_retryable());
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_connection_error() -> Result<()> {
        let client = client_with(FailingHttpSend);

        let err = client
            .send(ApiCall::new("socialize.getUserInfo")?)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_credential_is_config_error() -> Result<()> {
        #[derive(Debug)]
        struct NoCredential;

        #[async_trait]
        impl ProvideCredential for NoCredential {
            type Credential = Credential;

            async fn provide_credential(&self, _: &Context) -> Result<Option<Credential>> {
                Ok(None)
            }
        }

        let (mock, _) = MockHttpSend::with_body("{}");
        let client = Client::new(Context::new().with_http_send(mock), NoCredential);

        let err = client
            .send(ApiCall::new("socialize.getUserInfo")?)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        Ok(())
    }

    #[tokio::test]
    async fn test_timeout_maps_to_connection_error() -> Result<()> {
        #[derive(Debug)]
        struct StalledHttpSend;

        #[async_trait]
        impl HttpSend for StalledHttpSend {
            async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(http::Response::new(Bytes::new()))
            }
        }

        let client = client_with(StalledHttpSend);
        let call = ApiCall::new("socialize.getUserInfo")?.timeout(Duration::from_millis(10));

        let err = client.send(call).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        Ok(())
    }
}
