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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used to discover Gigya credentials.
pub const GIGYA_API_KEY: &str = "GIGYA_API_KEY";
pub const GIGYA_SECRET_KEY: &str = "GIGYA_SECRET_KEY";
pub const GIGYA_OAUTH_TOKEN: &str = "GIGYA_OAUTH_TOKEN";

/// All API hosts live under this domain; the method namespace picks the
/// subdomain.
pub const PROVIDER_HOST: &str = "gigya.com";

/// Domain used when a method name carries no namespace.
pub const DEFAULT_DOMAIN: &str = "socialize.gigya.com";

/// Accepted clock skew, in seconds, on either side of a webhook timestamp.
pub const REPLAY_WINDOW_SECS: i64 = 180;

/// AsciiSet for the Socialize signature base string.
///
/// Every byte outside the RFC 3986 unreserved set ('A'-'Z', 'a'-'z',
/// '0'-'9', '-', '.', '_', '~') is percent-encoded. The server reconstructs
/// the base string with the same set, so this must not drift.
pub static SIG_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
