use crate::constants::REPLAY_WINDOW_SECS;
use crate::signing::callback_base_string;
use gigya_core::hash::{base64_decode, base64_hmac_sha1, constant_time_eq};
use gigya_core::time::{now, DateTime};
use gigya_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// An inbound webhook notification, untrusted until validated.
#[derive(Debug, Clone)]
pub struct CallbackPayload {
    /// UID the notification is about.
    pub uid: String,
    /// Unix timestamp in seconds, as received on the wire.
    pub timestamp: String,
    /// Base64 encoded signature to verify.
    pub signature: String,
    /// Friend UID for friend-related notifications.
    pub friend_uid: Option<String>,
}

impl CallbackPayload {
    /// Create a payload from the raw webhook fields.
    pub fn new(uid: &str, timestamp: &str, signature: &str) -> Self {
        Self {
            uid: uid.to_string(),
            timestamp: timestamp.to_string(),
            signature: signature.to_string(),
            friend_uid: None,
        }
    }

    /// Attach the friend UID present on friend notifications.
    pub fn with_friend_uid(mut self, friend_uid: &str) -> Self {
        self.friend_uid = Some(friend_uid.to_string());
        self
    }
}

/// Validates webhook notification signatures.
///
/// Validation is a predicate, not a fallible operation: malformed input,
/// an expired timestamp, a missing secret and a forged signature all come
/// back as plain `false`. Callers have no reason to distinguish them.
///
/// ```
/// use gigya_socialize::{CallbackPayload, SignatureValidator};
///
/// let validator = SignatureValidator::new().with_default_secret("c2VjcmV0");
/// let payload = CallbackPayload::new("u123", "1000000000", "sig-from-wire");
/// if !validator.validate(&payload, None) {
///     // reject the notification
/// }
/// ```
#[derive(Default)]
pub struct SignatureValidator {
    default_secret: Option<String>,
    time: Option<DateTime>,
}

impl Debug for SignatureValidator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureValidator")
            .field("default_secret", &Redact::from(&self.default_secret))
            .finish()
    }
}

impl SignatureValidator {
    /// Create a validator with no default secret.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fallback secret for calls that do not pass one explicitly.
    ///
    /// This replaces ambient configuration lookup: whoever owns the
    /// configuration hands the secret over here, once.
    pub fn with_default_secret(mut self, secret_b64: &str) -> Self {
        self.default_secret = Some(secret_b64.to_string());
        self
    }

    /// Specify the validation time.
    ///
    /// # Note
    ///
    /// We should always validate against the current time.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Check a notification signature.
    ///
    /// The secret is taken from `secret_b64` when given, falling back to the
    /// validator's default. Timestamps further than 180 seconds from now, in
    /// either direction, are rejected as replays.
    pub fn validate(&self, payload: &CallbackPayload, secret_b64: Option<&str>) -> bool {
        if payload.signature.is_empty() || payload.timestamp.is_empty() {
            return false;
        }

        let Ok(timestamp) = payload.timestamp.trim().parse::<i64>() else {
            return false;
        };

        // abs_diff: a wire timestamp near i64::MIN must reject, not overflow.
        let now = self.time.unwrap_or_else(now).timestamp();
        if now.abs_diff(timestamp) > REPLAY_WINDOW_SECS as u64 {
            return false;
        }

        let Some(secret) = secret_b64.or(self.default_secret.as_deref()) else {
            return false;
        };
        let Ok(key) = base64_decode(secret) else {
            return false;
        };

        let base = callback_base_string(timestamp, &payload.uid, payload.friend_uid.as_deref());
        let expected = base64_hmac_sha1(&key, base.as_bytes());

        constant_time_eq(expected.as_bytes(), payload.signature.as_bytes())
    }
}
