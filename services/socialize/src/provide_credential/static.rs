// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::Credential;
use async_trait::async_trait;
use gigya_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider hands out credentials supplied directly by the
/// host application.
///
/// This is the provider to use when configuration discovery happens
/// elsewhere and the client only ever sees the resolved values.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    api_key: String,
    secret_key: Option<String>,
    oauth_token: Option<String>,
}

impl StaticCredentialProvider {
    /// Create a provider for shared-secret authentication.
    pub fn new(api_key: &str, secret_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            secret_key: Some(secret_key.to_string()),
            oauth_token: None,
        }
    }

    /// Create a provider for bearer-token authentication.
    pub fn bearer(api_key: &str, oauth_token: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            secret_key: None,
            oauth_token: Some(oauth_token.to_string()),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential {
            api_key: self.api_key.clone(),
            secret_key: self.secret_key.clone(),
            oauth_token: self.oauth_token.clone(),
        }))
    }
}
