//! Plain-text construction for environment overrides.

/// Construct a value directly from an environment variable's text.
///
/// When an environment variable named after a cache's service key is set,
/// [`SecretCache::reload`](crate::cache::SecretCache::reload) builds the
/// value through this trait instead of the byte-decoding path. The
/// conversion is infallible: every string must map to some value.
pub trait FromEnvText {
    fn from_env_text(text: &str) -> Self;
}

impl FromEnvText for String {
    fn from_env_text(text: &str) -> Self {
        text.to_owned()
    }
}
