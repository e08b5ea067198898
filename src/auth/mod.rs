//! Authentication: OAuth2 client-credentials tokens and their cache.

mod cache;
mod token;

use base64::{Engine as _, engine::general_purpose};

use crate::domain::{KeyId, KeySecret};

pub use cache::{CacheKey, CachedToken, TokenCache};
pub use token::{
    DEFAULT_TOKEN_ENDPOINT, MAX_CACHE_LIFETIME, MIN_CACHE_LIFETIME, REFRESH_MARGIN,
    TokenProvider, cache_lifetime,
};

/// `Authorization` header value for HTTP Basic auth with the key pair.
pub(crate) fn basic_authorization(key_id: &KeyId, key_secret: &KeySecret) -> String {
    let credentials = format!("{}:{}", key_id.as_str(), key_secret.expose());
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}
