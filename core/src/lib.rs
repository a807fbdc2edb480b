//! Core components for the Gigya API client.
//!
//! This crate provides the foundational types shared by the gigya crates:
//! the [`Context`] that carries the HTTP transport and environment access,
//! the [`Error`] type, cryptographic helpers in [`hash`], and the
//! [`ProvideCredential`] trait family used to resolve API credentials.
//!
//! ## Overview
//!
//! Service crates build on three abstractions:
//!
//! - **Context**: holds the [`HttpSend`] and [`Env`] implementations. Both
//!   default to no-op implementations so that pure signing code can run
//!   without any transport configured.
//! - **ProvideCredential**: resolves a credential from static values, the
//!   environment, or a chain of sources.
//! - **SigningCredential**: lets a client decide whether a cached credential
//!   is still usable before reloading.
//!
//! ## Example
//!
//! ```no_run
//! use gigya_core::{Context, OsEnv};
//!
//! let ctx = Context::new().with_env(OsEnv);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SigningCredential};
