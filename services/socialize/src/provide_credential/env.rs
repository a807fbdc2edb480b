use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use gigya_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads Gigya credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `GIGYA_API_KEY`: the site api key
/// - `GIGYA_SECRET_KEY`: the base64 shared secret (optional)
/// - `GIGYA_OAUTH_TOKEN`: a pre-issued bearer token (optional)
///
/// The api key plus at least one of the other two must be present, otherwise
/// this source yields nothing.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(api_key) = ctx.env_var(GIGYA_API_KEY) else {
            return Ok(None);
        };

        let secret_key = ctx.env_var(GIGYA_SECRET_KEY);
        let oauth_token = ctx.env_var(GIGYA_OAUTH_TOKEN);
        if secret_key.is_none() && oauth_token.is_none() {
            return Ok(None);
        }

        Ok(Some(Credential {
            api_key,
            secret_key,
            oauth_token,
        }))
    }
}
