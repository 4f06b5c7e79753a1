use std::collections::HashMap;

/// Host-provided localization lookup.
///
/// The accessor delegates message lookups here without caching or fallback;
/// what happens for an unknown id is the catalog's decision.
pub trait MessageCatalog {
    fn message(&self, id: &str) -> String;
}

/// Catalog used when none is injected: every id echoes back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCatalog;

impl MessageCatalog for NullCatalog {
    fn message(&self, id: &str) -> String {
        id.to_string()
    }
}

/// In-memory catalog; lookup misses fall back to the id itself.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    messages: HashMap<String, String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let messages = pairs
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect();
        Self { messages }
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(id.into(), text.into());
    }
}

impl MessageCatalog for StaticCatalog {
    fn message(&self, id: &str) -> String {
        self.messages
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}
