use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{MessageCatalog, NullCatalog};
use crate::store::PrefStore;
use crate::util::{parse_float_prefix, parse_int_prefix};

/// Separator used when splitting and joining list-valued preferences
/// unless the caller picks another one.
pub const DEFAULT_SEPARATOR: &str = "\n";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("separator must not be empty")]
    InvalidSeparator,
    #[error("failed to write preference: {0}")]
    Store(#[from] std::io::Error),
}

/// A default value for `set_defaults`. List defaults are joined with
/// [`DEFAULT_SEPARATOR`] before storing, so they round-trip through
/// [`Prefs::get_array`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrefValue {
    Text(String),
    List(Vec<String>),
}

impl PrefValue {
    fn render(&self) -> String {
        match self {
            PrefValue::Text(text) => text.clone(),
            PrefValue::List(items) => items.join(DEFAULT_SEPARATOR),
        }
    }
}

impl From<&str> for PrefValue {
    fn from(text: &str) -> Self {
        PrefValue::Text(text.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(text: String) -> Self {
        PrefValue::Text(text)
    }
}

impl From<Vec<String>> for PrefValue {
    fn from(items: Vec<String>) -> Self {
        PrefValue::List(items)
    }
}

/// Typed, default-aware access to a flat string key-value store.
///
/// The store and the message catalog are injected at construction; the
/// accessor keeps no state of its own beyond those collaborators.
#[derive(Debug)]
pub struct Prefs<S: PrefStore, C: MessageCatalog = NullCatalog> {
    store: S,
    catalog: C,
}

impl<S: PrefStore> Prefs<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            catalog: NullCatalog,
        }
    }
}

impl<S: PrefStore, C: MessageCatalog> Prefs<S, C> {
    pub fn with_catalog(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True iff the store currently holds a value for `key`. An empty
    /// string counts as present.
    pub fn exists(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    /// Stored value parsed as a base-10 integer. Absent keys and
    /// unparsable values degrade to 0; a numeric prefix is honored
    /// ("42abc" is 42, "3.9" truncates to 3).
    pub fn get_int(&self, key: &str) -> i64 {
        match self.store.get(key) {
            Some(value) => parse_int_prefix(&value),
            None => 0,
        }
    }

    /// Stored value parsed as a float; absent or unparsable degrades to 0.0.
    pub fn get_float(&self, key: &str) -> f64 {
        match self.store.get(key) {
            Some(value) => parse_float_prefix(&value),
            None => 0.0,
        }
    }

    /// Stored value split on [`DEFAULT_SEPARATOR`].
    pub fn get_array(&self, key: &str) -> Vec<String> {
        self.get_array_with(key, DEFAULT_SEPARATOR)
    }

    /// Stored value split on `separator`, order preserved; adjacent
    /// separators yield empty elements. Absent keys and empty values both
    /// give an empty vec (this accessor only). An empty separator does not
    /// split at all.
    pub fn get_array_with(&self, key: &str, separator: &str) -> Vec<String> {
        match self.store.get(key) {
            Some(value) if !value.is_empty() => {
                if separator.is_empty() {
                    vec![value]
                } else {
                    value.split(separator).map(str::to_string).collect()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Join `values` with [`DEFAULT_SEPARATOR`] and store under `key`.
    pub fn set_array<T: AsRef<str>>(&mut self, key: &str, values: &[T]) -> Result<(), PrefsError> {
        self.set_array_with(key, values, DEFAULT_SEPARATOR)
    }

    /// Join `values` with `separator` and store under `key`. The separator
    /// choice is not persisted; reading back with a different separator
    /// yields different splits. An empty separator is rejected before any
    /// store mutation.
    pub fn set_array_with<T: AsRef<str>>(
        &mut self,
        key: &str,
        values: &[T],
        separator: &str,
    ) -> Result<(), PrefsError> {
        if separator.is_empty() {
            return Err(PrefsError::InvalidSeparator);
        }
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(separator);
        self.store.set(key, &joined)?;
        Ok(())
    }

    /// Store `value` under `key`, coercing to its string form at this
    /// boundary.
    pub fn set(&mut self, key: &str, value: impl Display) -> Result<(), PrefsError> {
        self.store.set(key, &value.to_string())?;
        Ok(())
    }

    /// Write each default whose key is not yet present. Keys already in the
    /// store are left untouched, so repeated calls never overwrite values
    /// changed elsewhere.
    pub fn set_defaults(&mut self, defaults: &[(&str, PrefValue)]) -> Result<(), PrefsError> {
        for (key, value) in defaults {
            if !self.store.contains(key) {
                self.store.set(key, &value.render())?;
            }
        }
        Ok(())
    }

    /// Stored value if present, otherwise `default`.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.store.get(key) {
            Some(value) => value,
            None => default.to_string(),
        }
    }

    /// Raw stored value with default fallback. Stored values are always
    /// strings, so this is [`Prefs::get_string`] under another name.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.get_string(key, default)
    }

    /// Stored value if present, otherwise the empty string.
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get_string(key, "")
    }

    /// Localized message for `id`, straight from the injected catalog.
    pub fn message(&self, id: &str) -> String {
        self.catalog.message(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::StaticCatalog;
    use crate::store::{MemoryStore, PrefStore};
    use assert_matches::assert_matches;

    fn prefs() -> Prefs<MemoryStore> {
        Prefs::new(MemoryStore::new())
    }

    #[test]
    fn absent_key_resolves_to_fallbacks() {
        let p = prefs();
        assert!(!p.exists("missing"));
        assert_eq!(p.get_int("missing"), 0);
        assert_eq!(p.get_float("missing"), 0.0);
        assert_eq!(p.get_array("missing"), Vec::<String>::new());
        assert_eq!(p.get_string("missing", "fallback"), "fallback");
        assert_eq!(p.get("missing", ""), "");
    }

    #[test]
    fn integer_roundtrip_through_set() {
        let mut p = prefs();
        p.set("count", 42).unwrap();
        assert_eq!(p.get_int("count"), 42);
        p.set("count", -7).unwrap();
        assert_eq!(p.get_int("count"), -7);
    }

    #[test]
    fn int_parse_truncates_and_tolerates_suffix() {
        let mut p = prefs();
        p.set("rate", "3.9").unwrap();
        assert_eq!(p.get_int("rate"), 3);
        p.set("rate", "42abc").unwrap();
        assert_eq!(p.get_int("rate"), 42);
        p.set("rate", "garbage").unwrap();
        assert_eq!(p.get_int("rate"), 0);
    }

    #[test]
    fn float_parse_with_fallback() {
        let mut p = prefs();
        p.set("scale", "2.5").unwrap();
        assert_eq!(p.get_float("scale"), 2.5);
        p.set("scale", "x").unwrap();
        assert_eq!(p.get_float("scale"), 0.0);
    }

    #[test]
    fn array_roundtrip_default_separator() {
        let mut p = prefs();
        p.set_array("langs", &["a", "b", "c"]).unwrap();
        assert_eq!(p.get_array("langs"), vec!["a", "b", "c"]);
    }

    #[test]
    fn array_separator_choice_is_not_persisted() {
        let mut p = prefs();
        p.set_array_with("pair", &["a", "b"], "|").unwrap();
        assert_eq!(p.get_array_with("pair", "|"), vec!["a", "b"]);
        // Default separator does not match, so the value stays one element.
        assert_eq!(p.get_array("pair"), vec!["a|b"]);
    }

    #[test]
    fn array_preserves_empty_elements() {
        let mut p = prefs();
        p.set_array("items", &["a", "", "b"]).unwrap();
        assert_eq!(p.get_array("items"), vec!["a", "", "b"]);
    }

    #[test]
    fn empty_stored_value_reads_as_empty_array() {
        let mut p = prefs();
        p.set("empty", "").unwrap();
        assert!(p.exists("empty"));
        assert_eq!(p.get_array("empty"), Vec::<String>::new());
    }

    #[test]
    fn empty_separator_is_rejected_without_mutation() {
        let mut p = prefs();
        let err = p.set_array_with("k", &["a", "b"], "").unwrap_err();
        assert_matches!(err, PrefsError::InvalidSeparator);
        assert!(!p.exists("k"));
    }

    #[test]
    fn defaults_only_fill_unset_keys() {
        let mut p = prefs();
        p.set_defaults(&[("x", PrefValue::from("5"))]).unwrap();
        assert_eq!(p.get_int("x"), 5);

        p.set("x", 7).unwrap();
        p.set_defaults(&[("x", PrefValue::from("5"))]).unwrap();
        assert_eq!(p.get_int("x"), 7);
    }

    #[test]
    fn list_defaults_roundtrip_through_get_array() {
        let mut p = prefs();
        let default = PrefValue::from(vec!["a".to_string(), "b".to_string()]);
        p.set_defaults(&[("list", default)]).unwrap();
        assert_eq!(p.get_array("list"), vec!["a", "b"]);
        // The store itself holds the joined string form.
        assert_eq!(p.store().get("list"), Some("a\nb".to_string()));
    }

    #[test]
    fn default_tables_survive_json_serialization() {
        let defaults = vec![
            PrefValue::from("15"),
            PrefValue::from(vec!["a".to_string(), "b".to_string()]),
        ];
        let json = serde_json::to_string(&defaults).unwrap();
        let restored: Vec<PrefValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, defaults);
    }

    #[test]
    fn get_matches_get_string() {
        let mut p = prefs();
        p.set("k", "value").unwrap();
        assert_eq!(p.get("k", "d"), p.get_string("k", "d"));
    }

    #[test]
    fn get_or_empty_defaults_to_empty_string() {
        let mut p = prefs();
        assert_eq!(p.get_or_empty("missing"), "");
        p.set("k", "value").unwrap();
        assert_eq!(p.get_or_empty("k"), "value");
    }

    #[test]
    fn empty_separator_on_read_does_not_split() {
        let mut p = prefs();
        p.set("k", "ab").unwrap();
        assert_eq!(p.get_array_with("k", ""), vec!["ab"]);
    }

    #[test]
    fn message_delegates_to_catalog() {
        let catalog = StaticCatalog::from_pairs(&[("app_name", "Prefkit")]);
        let p = Prefs::with_catalog(MemoryStore::new(), catalog);
        assert_eq!(p.message("app_name"), "Prefkit");
        assert_eq!(p.message("unknown_id"), "unknown_id");
    }

    #[test]
    fn default_catalog_echoes_id() {
        let p = prefs();
        assert_eq!(p.message("anything"), "anything");
    }
}
