use crate::constants::{DEFAULT_DOMAIN, PROVIDER_HOST};
use gigya_core::{Error, Result};
use std::collections::BTreeMap;
use std::time::Duration;

/// A single call against the Socialize REST API.
///
/// The method name decides where the call goes: the namespace before the
/// first dot becomes the subdomain, the full method becomes the path.
///
/// ```
/// use gigya_socialize::ApiCall;
///
/// let call = ApiCall::new("gcs.getUserData")?
///     .param("UID", "some-uid")
///     .param("fields", "*")
///     .https(true);
/// # gigya_core::Result::Ok(())
/// ```
///
/// Every instance owns its own parameter map. Parameters set on one call can
/// never leak into another.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: String,
    domain: String,
    path: String,
    params: BTreeMap<String, String>,
    use_https: bool,
    timeout: Option<Duration>,
    force_text: bool,
}

impl ApiCall {
    /// Create a call for the given dotted method name.
    ///
    /// A single leading slash is tolerated and stripped. A method with an
    /// empty namespace (leading dot) routes to the default domain.
    pub fn new(method: &str) -> Result<Self> {
        let method = method.strip_prefix('/').unwrap_or(method);
        if method.is_empty() {
            return Err(Error::config_invalid("no API method specified"));
        }

        let (domain, path) = if method.starts_with('.') {
            (DEFAULT_DOMAIN.to_string(), format!("/{method}"))
        } else {
            let namespace = method.split('.').next().expect("split yields one token");
            (
                format!("{}.{}", namespace.to_lowercase(), PROVIDER_HOST),
                format!("/{method}"),
            )
        };

        Ok(Self {
            method: method.to_string(),
            domain,
            path,
            params: BTreeMap::new(),
            use_https: false,
            timeout: None,
            force_text: false,
        })
    }

    /// Set a request parameter.
    ///
    /// Values go through `ToString`, so booleans and numbers render the way
    /// the API expects (`true`, `false`, `42`).
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a request parameter on a call owned elsewhere.
    pub fn set_param(&mut self, key: &str, value: impl ToString) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Clear any parameters set so far.
    ///
    /// Routing derived from the method name is untouched.
    pub fn clear_params(&mut self) {
        self.params.clear();
    }

    /// Request HTTPS transport.
    ///
    /// Shared-secret calls default to plain HTTP with a signature; bearer
    /// calls always use HTTPS regardless of this flag.
    pub fn https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    /// Bound the dispatch call by a timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Return the response body as raw text regardless of its format.
    pub fn force_text(mut self) -> Self {
        self.force_text = true;
        self
    }

    /// The dotted method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The domain derived from the method namespace.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters set so far.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub(crate) fn use_https(&self) -> bool {
        self.use_https
    }

    pub(crate) fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn force_text_value(&self) -> bool {
        self.force_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigya_core::ErrorKind;

    #[test]
    fn test_routing_by_namespace() {
        let call = ApiCall::new("users.getAccountInfo").unwrap();
        assert_eq!(call.domain(), "users.gigya.com");
        assert_eq!(call.path(), "/users.getAccountInfo");

        let call = ApiCall::new("comments.getComments").unwrap();
        assert_eq!(call.domain(), "comments.gigya.com");
    }

    #[test]
    fn test_routing_empty_namespace() {
        let call = ApiCall::new(".getSomething").unwrap();
        assert_eq!(call.domain(), "socialize.gigya.com");
        assert_eq!(call.path(), "/.getSomething");
    }

    #[test]
    fn test_leading_slash_stripped() {
        let call = ApiCall::new("/socialize.getUserInfo").unwrap();
        assert_eq!(call.method(), "socialize.getUserInfo");
        assert_eq!(call.path(), "/socialize.getUserInfo");
    }

    #[test]
    fn test_empty_method_rejected() {
        let err = ApiCall::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        // A bare slash leaves nothing after stripping.
        assert!(ApiCall::new("/").is_err());
    }

    #[test]
    fn test_params_are_not_shared_between_calls() {
        let a = ApiCall::new("socialize.a").unwrap().param("leak", "1");
        let b = ApiCall::new("socialize.b").unwrap();
        assert!(a.params().contains_key("leak"));
        assert!(b.params().is_empty());
    }

    #[test]
    fn test_bool_param_renders_lowercase() {
        let call = ApiCall::new("socialize.a").unwrap().param("flag", false);
        assert_eq!(call.params()["flag"], "false");
    }
}
