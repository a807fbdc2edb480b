use crate::credential::Credential;
use crate::request::ApiCall;
use crate::signing::{request_base_string, sign_base_string};
use gigya_core::time::{now, unix_millis, DateTime};
use gigya_core::{Error, Result};
use std::collections::BTreeMap;
use std::time::Duration;

/// RequestSigner turns an [`ApiCall`] plus a [`Credential`] into a
/// [`SignedRequest`] ready for transport.
///
/// Mode selection:
///
/// - secret key over HTTPS: the raw secret rides along, TLS protects it, no
///   signature is computed;
/// - secret key over HTTP: `timestamp`, `nonce` and an HMAC-SHA1 `sig` are
///   injected, computed over the full outgoing parameter set;
/// - oauth token: the token alone authenticates and the call is forced onto
///   HTTPS.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Assemble the final parameter set and target URL for `call`.
    pub fn build(&self, call: &ApiCall, cred: &Credential) -> Result<SignedRequest> {
        if cred.api_key.is_empty() {
            return Err(Error::config_invalid("api key is missing"));
        }
        if cred.secret_key.is_none() && cred.oauth_token.is_none() {
            return Err(Error::config_invalid(
                "neither a secret key nor an oauth token is configured",
            ));
        }

        // Fresh map per request; the call keeps its own parameters.
        let mut params = call.params().clone();

        // An explicit _host overrides the routing entirely. It is consumed
        // here so it never reaches the wire or the signature.
        let domain = params
            .remove("_host")
            .unwrap_or_else(|| call.domain().to_string())
            .to_lowercase();

        params
            .entry("format".to_string())
            .or_insert_with(|| "json".to_string());
        // Errors come back as machine-readable bodies, not transport codes.
        params.insert("httpStatusCodes".to_string(), "false".to_string());
        params.insert(
            "sdk".to_string(),
            concat!("rust-", env!("CARGO_PKG_VERSION")).to_string(),
        );

        // Bearer calls must not go out in the clear.
        let use_https = call.use_https() || cred.secret_key.is_none();
        let scheme = if use_https { "https" } else { "http" };

        let (host, port) = split_host_port(&domain, if use_https { 443 } else { 80 })?;

        if let Some(secret) = &cred.secret_key {
            params.insert("apiKey".to_string(), cred.api_key.clone());
            if use_https {
                params.insert("secret".to_string(), secret.clone());
            } else {
                let millis = unix_millis(self.get_time());
                params.insert("timestamp".to_string(), (millis / 1000).to_string());
                params.insert("nonce".to_string(), millis.to_string());

                let base =
                    request_base_string("POST", scheme, &host, port, call.path(), &params);
                let sig = sign_base_string(secret, &base)?;
                params.insert("sig".to_string(), sig);
            }
        } else if let Some(token) = &cred.oauth_token {
            params.insert("oauth_token".to_string(), token.clone());
        }

        let format = params
            .get("format")
            .cloned()
            .unwrap_or_else(|| "json".to_string());

        Ok(SignedRequest {
            url: format!("{scheme}://{domain}{}", call.path()),
            params,
            format,
            force_text: call.force_text_value(),
            timeout: call.timeout_value(),
        })
    }
}

/// Split an optional `:port` suffix off a domain.
fn split_host_port(domain: &str, default_port: u16) -> Result<(String, u16)> {
    match domain.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|e| Error::config_invalid(format!("invalid port in host {domain:?}")).with_source(e))?;
            Ok((host.to_string(), port))
        }
        None => Ok((domain.to_string(), default_port)),
    }
}

/// A fully assembled request: target URL plus the complete outgoing
/// parameter set including computed authentication fields.
///
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    url: String,
    params: BTreeMap<String, String>,
    format: String,
    force_text: bool,
    timeout: Option<Duration>,
}

impl SignedRequest {
    /// The target URL, scheme and host already decided.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The complete outgoing parameter set.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The declared response format this request asked for.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Whether the caller asked for the raw body text.
    pub fn force_text(&self) -> bool {
        self.force_text
    }

    /// Caller-supplied dispatch timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Render the parameters as a form-urlencoded request body.
    pub fn body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}
