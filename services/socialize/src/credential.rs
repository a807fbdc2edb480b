use gigya_core::utils::Redact;
use gigya_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential for the Socialize API.
///
/// The secret key selects shared-secret HMAC authentication; the oauth token
/// selects bearer authentication. When both are set the secret key wins, as
/// it produces a signature instead of shipping a token with the call.
#[derive(Default, Clone)]
pub struct Credential {
    /// Site api key, sent with every call.
    pub api_key: String,
    /// Base64 encoded shared secret, used to sign calls.
    pub secret_key: Option<String>,
    /// Pre-issued bearer token, used when no secret is available.
    pub oauth_token: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("oauth_token", &Redact::from(&self.oauth_token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && (self.secret_key.is_some() || self.oauth_token.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        let mut cred = Credential::default();
        assert!(!cred.is_valid());

        cred.api_key = "key".to_string();
        // An api key alone cannot authenticate a call.
        assert!(!cred.is_valid());

        cred.secret_key = Some("c2VjcmV0".to_string());
        assert!(cred.is_valid());

        cred.secret_key = None;
        cred.oauth_token = Some("token".to_string());
        assert!(cred.is_valid());
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let cred = Credential {
            api_key: "2_6cIPnqrOU75VMqiYxer".to_string(),
            secret_key: Some("c2VjcmV0".to_string()),
            oauth_token: None,
        };
        let out = format!("{cred:?}");
        assert!(!out.contains("c2VjcmV0"));
        assert!(!out.contains("2_6cIPnqrOU75VMqiYxer"));
    }
}
