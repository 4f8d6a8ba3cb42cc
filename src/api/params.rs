//! Request parameters gathered from the query string, a form body or a JSON body.

use std::collections::{HashMap, HashSet};

use super::error::ApiError;

/// Flat string view over every parameter a CRUD request carries.
///
/// Precedence is query string, then urlencoded form, then JSON object. The
/// first non-empty value for a key wins. A JSON `null` with no value from an
/// earlier source marks the key as cleared (see the `nullable_*` accessors).
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    values: HashMap<String, String>,
    cleared: HashSet<String>,
}

impl RequestParams {
    pub fn from_parts(query: Option<&str>, content_type: Option<&str>, body: &[u8]) -> Self {
        let mut params = Self::default();

        if let Some(query) = query {
            params.extend(url::form_urlencoded::parse(query.as_bytes()).into_owned());
        }

        let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
        if content_type.starts_with("application/x-www-form-urlencoded") {
            params.extend(url::form_urlencoded::parse(body).into_owned());
        } else if !body.is_empty() {
            // Clients do not always label JSON bodies, so try regardless of content type
            if let Ok(serde_json::Value::Object(map)) =
                serde_json::from_slice::<serde_json::Value>(body)
            {
                for (key, value) in map {
                    if value.is_null() {
                        params.cleared.insert(key);
                    } else if let Some(value) = json_scalar(value) {
                        params.extend([(key, value)]);
                    }
                }
            }
        }

        params
    }

    fn extend(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            self.values
                .entry(key)
                .or_insert_with(|| value.to_string());
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn owned_text(&self, key: &str) -> Option<String> {
        self.text(key).map(str::to_string)
    }

    pub fn int(&self, key: &str) -> Result<Option<i64>, ApiError> {
        self.parsed(key)
    }

    pub fn float(&self, key: &str) -> Result<Option<f64>, ApiError> {
        self.parsed(key)
    }

    /// `Some(None)` when the body sent an explicit `null` for the key.
    pub fn nullable_text(&self, key: &str) -> Option<Option<String>> {
        self.or_cleared(key, self.owned_text(key))
    }

    pub fn nullable_int(&self, key: &str) -> Result<Option<Option<i64>>, ApiError> {
        Ok(self.or_cleared(key, self.int(key)?))
    }

    pub fn nullable_float(&self, key: &str) -> Result<Option<Option<f64>>, ApiError> {
        Ok(self.or_cleared(key, self.float(key)?))
    }

    fn or_cleared<T>(&self, key: &str, value: Option<T>) -> Option<Option<T>> {
        match value {
            Some(value) => Some(Some(value)),
            None if self.cleared.contains(key) => Some(None),
            None => None,
        }
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ApiError> {
        self.text(key)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ApiError::bad_request(format!("Invalid value for '{}'", key)))
            })
            .transpose()
    }
}

fn json_scalar(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
