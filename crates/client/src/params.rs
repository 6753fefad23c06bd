//! Query-string building and partial-update marshaling.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::form_urlencoded;

/// Builder for endpoint query strings.
///
/// Pairs are percent-encoded in insertion order; list values are
/// comma-joined into a single value.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single key/value pair.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Sets a comma-joined list value. Empty lists are skipped entirely.
    pub fn set_list<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.set(key, joined);
        }
        self
    }

    /// True when no parameters have been set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encodes the accumulated pairs.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Appends the encoded query to `path`, or returns the bare path when
    /// nothing was set.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

/// Three-state field for PATCH request bodies.
///
/// Distinguishes leaving a field unchanged (absent from the body), clearing
/// it (present and `null`), and setting a value. `Keep` is the default and
/// must be skipped at the struct level:
///
/// ```rust,ignore
/// #[serde(skip_serializing_if = "Patch::is_keep")]
/// pub name: Patch<String>,
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the field unchanged; omitted from the request body.
    Keep,
    /// Clear the field; serialized as an explicit `null`.
    Clear,
    /// Set the field to this value.
    Set(T),
}

impl<T> Patch<T> {
    /// True when the field should be omitted from the body.
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// The set value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

// A manual impl keeps `Patch<T>: Default` free of a `T: Default` bound.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Keep is skipped at the struct level; if it does serialize it
            // is indistinguishable from Clear.
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
            Patch::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_encode() {
        let mut q = QueryParams::new();
        q.set("search", "acme inc");
        q.set("status", "active");
        assert_eq!(q.encode(), "search=acme+inc&status=active");
    }

    #[test]
    fn test_set_list_joins_with_comma() {
        let mut q = QueryParams::new();
        q.set_list("id", ["ctm_1", "ctm_2"]);
        // The comma separator is percent-encoded like any other value byte.
        assert_eq!(q.encode(), "id=ctm_1%2Cctm_2");
    }

    #[test]
    fn test_set_list_skips_empty() {
        let mut q = QueryParams::new();
        q.set_list("id", Vec::<String>::new());
        assert!(q.is_empty());
    }

    #[test]
    fn test_append_to_bare_path() {
        let q = QueryParams::new();
        assert_eq!(q.append_to("customers"), "customers");
    }

    #[test]
    fn test_append_to_with_query() {
        let mut q = QueryParams::new();
        q.set("include", "product");
        assert_eq!(q.append_to("prices"), "prices?include=product");
    }

    #[derive(Serialize, Default)]
    struct Body {
        #[serde(skip_serializing_if = "Patch::is_keep")]
        name: Patch<String>,
        #[serde(skip_serializing_if = "Patch::is_keep")]
        locale: Patch<String>,
    }

    #[test]
    fn test_patch_keep_is_omitted() {
        let body = Body::default();
        assert_eq!(serde_json::to_string(&body).unwrap(), "{}");
    }

    #[test]
    fn test_patch_clear_serializes_null() {
        let body = Body {
            name: Patch::Clear,
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":null}"#);
    }

    #[test]
    fn test_patch_set_serializes_value() {
        let body = Body {
            name: Patch::Set("Acme".to_string()),
            locale: Patch::Keep,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":"Acme"}"#);
    }

    #[test]
    fn test_patch_null_and_absent_differ() {
        let cleared = Body {
            name: Patch::Clear,
            ..Default::default()
        };
        let kept = Body::default();
        assert_ne!(
            serde_json::to_string(&cleared).unwrap(),
            serde_json::to_string(&kept).unwrap()
        );
    }

    #[test]
    fn test_patch_deserialize() {
        #[derive(Deserialize)]
        struct Incoming {
            #[serde(default)]
            name: Patch<String>,
        }

        let missing: Incoming = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.name, Patch::Keep);

        let null: Incoming = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(null.name, Patch::Clear);

        let set: Incoming = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(set.name, Patch::Set("Acme".to_string()));
    }
}
