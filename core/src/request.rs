use http::Uri;

use crate::{Error, Result};

/// Decomposed view of a url used while computing a signature.
///
/// Query pairs keep the order they had in the url and are form-url-decoded,
/// so `brand_name=Acme+Co` is seen as `("brand_name", "Acme Co")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// Scheme and authority, e.g. `https://open-api.example.com`.
    ///
    /// Empty when a bare path was given.
    pub root: String,
    /// Url path, always starting with `/`.
    pub path: String,
    /// Query pairs in url order.
    pub query: Vec<(String, String)>,
}

impl SigningRequest {
    /// Build a signing request from an absolute url or a bare path.
    pub fn build(url: &str) -> Result<Self> {
        let uri: Uri = url.parse()?;

        let root = match (uri.scheme_str(), uri.authority()) {
            (Some(scheme), Some(authority)) => format!("{scheme}://{authority}"),
            (None, None) => String::new(),
            _ => {
                return Err(Error::request_invalid(format!(
                    "url must be absolute or a bare path: {url}"
                )))
            }
        };

        let path = match uri.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };

        Ok(SigningRequest {
            root,
            path,
            query: uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Remove every query pair with the given key.
    pub fn query_remove(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }

    /// Convert sorted query to string.
    ///
    /// Pairs are sorted by key, then by value, using byte order.
    ///
    /// ```shell
    /// [(c, d), (a, b)] with sep ":" join "\n" => "a:b\nc:d"
    /// ```
    pub fn query_to_string(mut query: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            if !v.is_empty() {
                s.push_str(sep);
                s.push_str(&v);
            }
        }

        s
    }
}
