//! Query parameters for collection endpoints

use std::collections::BTreeMap;

/// Query-string parameters sent with collection requests
///
/// Keys are kept sorted so the produced query string is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    /// Creates an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of items per page
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    /// Number of items to skip
    pub fn skip(self, skip: u32) -> Self {
        self.param("skip", skip.to_string())
    }

    /// Sort order, e.g. `-sys.createdAt`
    pub fn order(self, order: impl Into<String>) -> Self {
        self.param("order", order)
    }

    /// Restricts the returned fields. `sys` is always kept so items can be wrapped.
    pub fn select(self, select: impl Into<String>) -> Self {
        self.param("select", normalize_select(&select.into()))
    }

    /// Sets an arbitrary parameter, replacing any previous value
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Looks up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over the parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn normalize_select(select: &str) -> String {
    let fields: Vec<&str> = select
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if fields.iter().any(|f| *f == "sys" || f.starts_with("sys.")) {
        fields.join(",")
    } else if fields.is_empty() {
        "sys".to_string()
    } else {
        format!("{},sys", fields.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let query = Query::new().limit(10).skip(20).order("-sys.createdAt");
        assert_eq!(query.get("limit"), Some("10"));
        assert_eq!(query.get("skip"), Some("20"));
        assert_eq!(query.get("order"), Some("-sys.createdAt"));
        assert!(!query.is_empty());
        assert!(Query::new().is_empty());
    }

    #[test]
    fn test_select_keeps_sys() {
        assert_eq!(Query::new().select("fields.title").get("select"), Some("fields.title,sys"));
        assert_eq!(Query::new().select("sys,fields.title").get("select"), Some("sys,fields.title"));
        assert_eq!(Query::new().select("sys.id, fields").get("select"), Some("sys.id,fields"));
        assert_eq!(Query::new().select("").get("select"), Some("sys"));
    }

    #[test]
    fn test_iter_is_sorted() {
        let query = Query::new().param("b", "2").param("a", "1");
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
