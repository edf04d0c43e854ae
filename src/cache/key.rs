//! Cache key construction.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error raised when a cache key cannot be derived from its inputs.
///
/// This is fatal and surfaced to the caller immediately; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("cache key endpoint must not be empty")]
    EmptyEndpoint,

    #[error("cache key parameter name must not be empty")]
    EmptyParamName,
}

/// An opaque, stable cache key.
///
/// Keys are plain strings rather than digests so that a key seen in logs or
/// in a Redis `SCAN` immediately identifies the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Starts building a key for the given endpoint identifier.
    pub fn builder(endpoint: impl Into<String>) -> CacheKeyBuilder {
        CacheKeyBuilder {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builder deriving a [`CacheKey`] from an endpoint and its
/// response-affecting parameters.
///
/// Parameters are kept in a `BTreeMap`, so insertion order never influences
/// the derived key: two logically identical requests always produce an
/// identical key.
pub struct CacheKeyBuilder {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl CacheKeyBuilder {
    /// Adds a parameter that affects the response (e.g. `uid`, `info`).
    ///
    /// A later value for the same name overwrites the earlier one.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Derives the key. Pure; no I/O.
    pub fn build(self) -> Result<CacheKey, KeyError> {
        if self.endpoint.is_empty() {
            return Err(KeyError::EmptyEndpoint);
        }
        if self.params.keys().any(|k| k.is_empty()) {
            return Err(KeyError::EmptyParamName);
        }

        let mut key = escape(&self.endpoint);
        for (i, (name, value)) in self.params.iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(&escape(name));
            key.push('=');
            key.push_str(&escape(value));
        }
        Ok(CacheKey(key))
    }
}

// Escapes the key's structural characters so distinct inputs can never
// collide (e.g. param value "a&b=c" vs two separate params).
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '?' | '&' | '=' | '%' => {
                out.push('%');
                out.push_str(&format!("{:02X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_requests_produce_identical_keys() {
        let a = CacheKey::builder("gi/showcase")
            .param("uid", "901211014")
            .param("lang", "en")
            .build()
            .unwrap();
        let b = CacheKey::builder("gi/showcase")
            .param("lang", "en")
            .param("uid", "901211014")
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn differing_params_produce_different_keys() {
        let a = CacheKey::builder("gi/showcase")
            .param("uid", "901211014")
            .build()
            .unwrap();
        let b = CacheKey::builder("gi/showcase")
            .param("uid", "901211015")
            .build()
            .unwrap();
        assert_ne!(a, b);

        let with_info = CacheKey::builder("gi/showcase")
            .param("uid", "901211014")
            .param("info", "1")
            .build()
            .unwrap();
        assert_ne!(a, with_info);
    }

    #[test]
    fn structural_characters_cannot_collide() {
        let sneaky = CacheKey::builder("gi/showcase")
            .param("uid", "1&info=1")
            .build()
            .unwrap();
        let honest = CacheKey::builder("gi/showcase")
            .param("uid", "1")
            .param("info", "1")
            .build()
            .unwrap();
        assert_ne!(sneaky, honest);
    }

    #[test]
    fn keys_stay_human_readable() {
        let key = CacheKey::builder("gi/showcase")
            .param("uid", "901211014")
            .build()
            .unwrap();
        assert_eq!(key.as_str(), "gi/showcase?uid=901211014");
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        assert_eq!(
            CacheKey::builder("").build().unwrap_err(),
            KeyError::EmptyEndpoint
        );
        assert_eq!(
            CacheKey::builder("gi/showcase")
                .param("", "x")
                .build()
                .unwrap_err(),
            KeyError::EmptyParamName
        );
    }
}
