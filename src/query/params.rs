//! Ordered query parameter store.
//!
//! The CDX API expects some keys (`filter`, `collapse`) to be repeated, once
//! per value, and the relative order of those repeats matters. The store is a
//! map from key to an ordered list of values: scalar keys hold exactly one
//! value, repeated keys hold one entry per call in insertion order.

use std::collections::BTreeMap;

use url::form_urlencoded;

pub(crate) const KEY_URL: &str = "url";
pub(crate) const KEY_MATCH_TYPE: &str = "matchType";
pub(crate) const KEY_OUTPUT: &str = "output";
pub(crate) const KEY_LIMIT: &str = "limit";
pub(crate) const KEY_OFFSET: &str = "offset";
pub(crate) const KEY_FROM: &str = "from";
pub(crate) const KEY_TO: &str = "to";
pub(crate) const KEY_GZIP: &str = "gzip";
pub(crate) const KEY_FILTER: &str = "filter";
pub(crate) const KEY_COLLAPSE: &str = "collapse";
pub(crate) const KEY_RESUME_KEY: &str = "resumeKey";
pub(crate) const KEY_SHOW_RESUME_KEY: &str = "showResumeKey";
pub(crate) const KEY_PAGE: &str = "page";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParamStore {
    params: BTreeMap<&'static str, Vec<String>>,
}

impl ParamStore {
    /// Replaces every value of `key` with `value`.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.params.insert(key, vec![value.into()]);
    }

    /// Appends `value` after the existing values of `key`.
    pub fn append(&mut self, key: &'static str, value: impl Into<String>) {
        self.params.entry(key).or_default().push(value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.params.remove(key);
    }

    /// First value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `key` in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.params.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Form-encodes every pair, keys ascending, repeated values in insertion order.
    ///
    /// The escape set is the archive's reference one: `~` stays literal and
    /// `*` is escaped, unlike plain `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.params {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        // a literal '%' is emitted as "%25", so "%7E" only comes from '~'
        serializer
            .finish()
            .replace('*', "%2A")
            .replace("%7E", "~")
    }
}
