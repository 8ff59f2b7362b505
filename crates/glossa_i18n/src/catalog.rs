//! Raw message catalogs as loaders hand them over.
//!
//! A catalog is an ordered tree: leaves are message templates, inner nodes
//! group keys. Lookups address leaves by their dotted path (`text.hello`).

use indexmap::IndexMap;

const MAX_DEPTH: usize = 32;

/// One node of a catalog tree.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogNode {
    Text(String),
    Group(Catalog),
}

impl From<String> for CatalogNode {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for CatalogNode {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Catalog> for CatalogNode {
    fn from(v: Catalog) -> Self {
        Self::Group(v)
    }
}

/// A (possibly nested) mapping of keys to message templates for one
/// `(domain, locale)` pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    entries: IndexMap<String, CatalogNode>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<CatalogNode>) {
        self.entries.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&CatalogNode> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replace top-level entries with those of `other`.
    ///
    /// The merge is shallow: a group in `other` replaces the whole group of
    /// the same name here.
    pub fn replace_from(&mut self, other: Catalog) {
        for (k, v) in other.entries {
            self.entries.insert(k, v);
        }
    }

    /// Flatten the tree into `dotted.key -> template` pairs, depth first.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        flatten_into(self, "", &mut out);
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<CatalogNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cat = Catalog::new();
        for (k, v) in iter {
            cat.insert(k, v);
        }
        cat
    }
}

fn flatten_into(catalog: &Catalog, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, node) in &catalog.entries {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            CatalogNode::Text(text) => out.push((path, text.clone())),
            CatalogNode::Group(group) => flatten_into(group, &path, out),
        }
    }
}

fn check_depth(depth: usize) -> Result<(), String> {
    if depth > MAX_DEPTH {
        return Err(format!("catalog nested too deeply (max {MAX_DEPTH} levels)"));
    }
    Ok(())
}

#[cfg(feature = "yaml")]
pub(crate) mod yaml {
    use serde_yaml::Value;

    use super::{check_depth, Catalog, CatalogNode};

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => scalar(&tagged.value),
            _ => None,
        }
    }

    fn node(value: &Value, depth: usize) -> Result<Option<CatalogNode>, String> {
        check_depth(depth)?;
        Ok(match value {
            Value::Null => None,
            Value::Mapping(map) => {
                let mut cat = Catalog::new();
                for (k, v) in map {
                    let Some(key) = scalar(k) else {
                        return Err("yaml keys must be scalars".to_string());
                    };
                    if let Some(child) = node(v, depth + 1)? {
                        cat.insert(key, child);
                    }
                }
                Some(CatalogNode::Group(cat))
            }
            Value::Sequence(seq) => {
                let mut cat = Catalog::new();
                for (i, v) in seq.iter().enumerate() {
                    if let Some(child) = node(v, depth + 1)? {
                        cat.insert(i.to_string(), child);
                    }
                }
                Some(CatalogNode::Group(cat))
            }
            Value::Tagged(tagged) => node(&tagged.value, depth)?,
            other => scalar(other).map(CatalogNode::Text),
        })
    }

    /// Convert a parsed document. Documents that are not mappings hold no messages.
    pub(crate) fn to_catalog(value: &Value) -> Result<Catalog, String> {
        match value {
            Value::Mapping(_) => match node(value, 0)? {
                Some(CatalogNode::Group(cat)) => Ok(cat),
                _ => Ok(Catalog::new()),
            },
            _ => Ok(Catalog::new()),
        }
    }
}

#[cfg(feature = "json")]
pub(crate) mod json {
    use serde_json::Value;

    use super::{check_depth, Catalog, CatalogNode};

    fn node(value: &Value, depth: usize) -> Result<Option<CatalogNode>, String> {
        check_depth(depth)?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(CatalogNode::Text(s.clone())),
            Value::Number(n) => Some(CatalogNode::Text(n.to_string())),
            Value::Bool(b) => Some(CatalogNode::Text(b.to_string())),
            Value::Array(items) => {
                let mut cat = Catalog::new();
                for (i, v) in items.iter().enumerate() {
                    if let Some(child) = node(v, depth + 1)? {
                        cat.insert(i.to_string(), child);
                    }
                }
                Some(CatalogNode::Group(cat))
            }
            Value::Object(map) => {
                let mut cat = Catalog::new();
                for (k, v) in map {
                    if let Some(child) = node(v, depth + 1)? {
                        cat.insert(k.clone(), child);
                    }
                }
                Some(CatalogNode::Group(cat))
            }
        })
    }

    pub(crate) fn to_catalog(value: &Value) -> Result<Catalog, String> {
        match value {
            Value::Object(_) => match node(value, 0)? {
                Some(CatalogNode::Group(cat)) => Ok(cat),
                _ => Ok(Catalog::new()),
            },
            _ => Ok(Catalog::new()),
        }
    }
}
