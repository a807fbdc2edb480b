//! Gigya Socialize API client.
//!
//! This crate builds, signs, and dispatches calls against the Gigya
//! Socialize REST API, and validates the signed webhook notifications the
//! platform sends back.
//!
//! ## Overview
//!
//! Gigya authenticates calls in one of two ways. With a shared secret the
//! client signs every plain-HTTP call with HMAC-SHA1 over a canonical base
//! string (or ships the secret itself when TLS protects the channel). With
//! a pre-issued oauth token the token alone authenticates the call, always
//! over HTTPS. This crate implements both modes, picking one from the
//! credential that the configured provider resolves.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gigya_core::{Context, Result};
//! use gigya_http_send_reqwest::ReqwestHttpSend;
//! use gigya_socialize::{ApiCall, Client, StaticCredentialProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//!
//!     let loader = StaticCredentialProvider::new("your-api-key", "your-secret-key");
//!     let client = Client::new(ctx, loader);
//!
//!     let call = ApiCall::new("gcs.getUserData")?
//!         .param("UID", "some-user-uid")
//!         .param("fields", "*")
//!         .https(true);
//!
//!     let response = client.send(call).await?;
//!     println!("{:?}", response.as_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export GIGYA_API_KEY=your-api-key
//! export GIGYA_SECRET_KEY=your-base64-secret-key
//! export GIGYA_OAUTH_TOKEN=your-token   # alternative to the secret key
//! ```
//!
//! [`DefaultCredentialProvider`] reads these through the context's
//! environment, so tests can substitute a `StaticEnv` without touching the
//! process environment.
//!
//! ## Webhook Validation
//!
//! Inbound notifications carry a `timestamp`, a `UID`, and an HMAC-SHA1
//! `signature`. [`SignatureValidator`] checks the signature in constant time
//! and rejects timestamps older or newer than three minutes:
//!
//! ```
//! use gigya_socialize::{CallbackPayload, SignatureValidator};
//!
//! let validator = SignatureValidator::new().with_default_secret("your-secret-key");
//! let payload = CallbackPayload::new("uid-from-wire", "1355401457", "sig-from-wire");
//! assert!(!validator.validate(&payload, None));
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod request;
pub use request::ApiCall;

mod signing;

mod sign_request;
pub use sign_request::{RequestSigner, SignedRequest};

mod client;
pub use client::{ApiResponse, Client};

mod validate;
pub use validate::{CallbackPayload, SignatureValidator};

mod provide_credential;
pub use provide_credential::*;
