use std::collections::BTreeMap;

use lintignore_types::ConfigFile;

/// Legacy short code -> canonical rule code.
///
/// Supplied by the rule registry. Codes without an entry resolve to
/// themselves, so unknown codes keep matching only their exact spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeAliases {
    map: BTreeMap<String, String>,
}

impl CodeAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigFile) -> Self {
        config
            .aliases
            .iter()
            .map(|(legacy, canonical)| (legacy.clone(), canonical.clone()))
            .collect()
    }

    pub fn insert(&mut self, legacy: impl Into<String>, canonical: impl Into<String>) {
        self.map.insert(legacy.into(), canonical.into());
    }

    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.map.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodeAliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = Self::new();
        for (legacy, canonical) in iter {
            aliases.insert(legacy, canonical);
        }
        aliases
    }
}
