//! The configuration tree model: a tagged value enum with an opaque artifact
//! variant, plus dotted-path access helpers and TOML interop.
//!
//! Artifact-ness is a variant, not a runtime predicate: the scrubber and the
//! converters dispatch by pattern matching, so a new leaf kind cannot slip
//! past them unhandled.

use std::collections::BTreeMap;

use crate::error::StructuralError;

/// A map node. Keys are unique; iteration order is sorted, which keeps every
/// derived output (listings, placeholders, templates) stable across runs.
pub type Tree = BTreeMap<String, ConfigValue>;

/// A node in a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<ConfigValue>),
    Table(Tree),
    /// An opaque build output. Identified by name only; never decomposed.
    Artifact(Artifact),
}

/// Identity of a build output embedded in a configuration tree.
///
/// An artifact may carry an intrinsic dotted name. When it does, that name
/// wins over the artifact's tree position during scrubbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: Option<String>,
}

impl Artifact {
    /// An artifact that names itself, independent of where it sits in a tree.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// An artifact identified only by its tree position.
    pub fn anonymous() -> Self {
        Self { name: None }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Tree> {
        match self {
            ConfigValue::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_artifact(&self) -> bool {
        matches!(self, ConfigValue::Artifact(_))
    }

    /// Convert into a plain `toml::Value`.
    ///
    /// Fails with [`StructuralError::UnscrubbedArtifact`] if any artifact is
    /// still present — scrub first when handing a tree to TOML-speaking
    /// consumers.
    pub fn to_toml(&self) -> Result<toml::Value, StructuralError> {
        self.to_toml_at("")
    }

    fn to_toml_at(&self, path: &str) -> Result<toml::Value, StructuralError> {
        match self {
            ConfigValue::String(s) => Ok(toml::Value::String(s.clone())),
            ConfigValue::Integer(i) => Ok(toml::Value::Integer(*i)),
            ConfigValue::Float(f) => Ok(toml::Value::Float(*f)),
            ConfigValue::Boolean(b) => Ok(toml::Value::Boolean(*b)),
            ConfigValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(item.to_toml_at(&dotted(path, &i.to_string()))?);
                }
                Ok(toml::Value::Array(out))
            }
            ConfigValue::Table(t) => {
                let mut out = toml::Table::new();
                for (key, value) in t {
                    out.insert(key.clone(), value.to_toml_at(&dotted(path, key))?);
                }
                Ok(toml::Value::Table(out))
            }
            ConfigValue::Artifact(_) => Err(StructuralError::UnscrubbedArtifact {
                path: path.to_string(),
            }),
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Boolean(b),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            toml::Value::Table(t) => ConfigValue::Table(
                t.into_iter()
                    .map(|(key, value)| (key, ConfigValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

/// Parse a TOML document into a [`Tree`].
pub fn from_toml_str(content: &str) -> Result<Tree, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, ConfigValue::from(value)))
        .collect())
}

/// Navigate a [`Tree`] by dotted key path (e.g. `"man.enable"`).
pub fn get<'a>(tree: &'a Tree, dotted_key: &str) -> Option<&'a ConfigValue> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let tbl = match path {
        Some(path) => {
            let mut current = tree;
            for segment in path.split('.') {
                current = current.get(segment)?.as_table()?;
            }
            current
        }
        None => tree,
    };

    tbl.get(leaf)
}

/// Insert a value at a dotted key path, creating intermediate tables.
pub fn set(tree: &mut Tree, dotted_key: &str, value: ConfigValue) {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let mut current = tree;

    for segment in &segments[..segments.len() - 1] {
        current = match current
            .entry(segment.to_string())
            .or_insert_with(|| ConfigValue::Table(Tree::new()))
        {
            ConfigValue::Table(t) => t,
            _ => panic!("docfig: path conflict — intermediate key is not a table"),
        };
    }

    let leaf = segments.last().unwrap();
    current.insert(leaf.to_string(), value);
}

/// Flatten a tree into dotted leaf pairs. Tables are recursed into; lists and
/// artifacts count as leaves. Empty tables produce no entries.
pub fn entries(tree: &Tree) -> Vec<(String, ConfigValue)> {
    let mut out = Vec::new();
    collect_entries(tree, "", &mut out);
    out
}

fn collect_entries(tree: &Tree, prefix: &str, out: &mut Vec<(String, ConfigValue)>) {
    for (key, value) in tree {
        let path = dotted(prefix, key);
        match value {
            ConfigValue::Table(t) => collect_entries(t, &path, out),
            other => out.push((path, other.clone())),
        }
    }
}

/// Format a value for display in listings.
pub(crate) fn format_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Integer(i) => i.to_string(),
        ConfigValue::Float(f) => f.to_string(),
        ConfigValue::Boolean(b) => b.to_string(),
        ConfigValue::List(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        ConfigValue::Table(t) => {
            let inner: Vec<String> = t
                .iter()
                .map(|(key, value)| format!("{key} = {}", format_value(value)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        ConfigValue::Artifact(a) => match a.name() {
            Some(name) => format!("<artifact {name}>"),
            None => "<artifact>".to_string(),
        },
    }
}

pub(crate) fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(toml_str: &str) -> Tree {
        from_toml_str(toml_str).unwrap()
    }

    #[test]
    fn get_flat_key() {
        let t = tree("port = 8080");
        assert_eq!(get(&t, "port").unwrap().as_integer().unwrap(), 8080);
    }

    #[test]
    fn get_nested_key() {
        let t = tree("[man]\nenable = true");
        assert!(get(&t, "man.enable").unwrap().as_bool().unwrap());
    }

    #[test]
    fn get_missing_key() {
        let t = tree("port = 8080");
        assert!(get(&t, "nope").is_none());
        assert!(get(&t, "port.deeper").is_none());
    }

    #[test]
    fn set_flat_key() {
        let mut t = Tree::new();
        set(&mut t, "enable", ConfigValue::Boolean(true));
        assert!(t["enable"].as_bool().unwrap());
    }

    #[test]
    fn set_creates_intermediate_tables() {
        let mut t = Tree::new();
        set(&mut t, "man.generate_caches", ConfigValue::Boolean(true));
        let man = t["man"].as_table().unwrap();
        assert!(man["generate_caches"].as_bool().unwrap());
    }

    #[test]
    fn set_deep_nesting() {
        let mut t = Tree::new();
        set(&mut t, "a.b.c.d", ConfigValue::Integer(42));
        assert_eq!(get(&t, "a.b.c.d").unwrap().as_integer().unwrap(), 42);
    }

    #[test]
    fn from_toml_preserves_shape() {
        let t = tree("name = \"x\"\n[man]\nenable = false\npaths = [\"a\", \"b\"]");
        assert_eq!(t["name"].as_str().unwrap(), "x");
        let man = t["man"].as_table().unwrap();
        assert!(!man["enable"].as_bool().unwrap());
        assert_eq!(man["paths"].as_list().unwrap().len(), 2);
    }

    #[test]
    fn to_toml_round_trips_plain_values() {
        let t = tree("port = 8080\n[man]\nenable = true");
        let value = ConfigValue::Table(t).to_toml().unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table["port"].as_integer().unwrap(), 8080);
        assert!(table["man"]["enable"].as_bool().unwrap());
    }

    #[test]
    fn to_toml_rejects_artifacts_with_path() {
        let mut t = Tree::new();
        set(
            &mut t,
            "pkgs.man-db",
            ConfigValue::Artifact(Artifact::anonymous()),
        );
        let err = ConfigValue::Table(t).to_toml().unwrap_err();
        match err {
            StructuralError::UnscrubbedArtifact { path } => assert_eq!(path, "pkgs.man-db"),
            other => panic!("Expected UnscrubbedArtifact, got: {other:?}"),
        }
    }

    #[test]
    fn entries_flattens_leaves() {
        let t = tree("enable = true\n[man]\nenable = false");
        let pairs = entries(&t);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("enable".into(), ConfigValue::Boolean(true))));
        assert!(pairs.contains(&("man.enable".into(), ConfigValue::Boolean(false))));
    }

    #[test]
    fn entries_treats_lists_as_leaves() {
        let t = tree("paths = [\"a\"]");
        let pairs = entries(&t);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "paths");
    }

    #[test]
    fn format_value_scalars() {
        assert_eq!(format_value(&ConfigValue::from("x")), "x");
        assert_eq!(format_value(&ConfigValue::from(8080i64)), "8080");
        assert_eq!(format_value(&ConfigValue::from(true)), "true");
    }

    #[test]
    fn format_value_list_and_artifact() {
        let list = ConfigValue::List(vec![ConfigValue::from("a"), ConfigValue::from("b")]);
        assert_eq!(format_value(&list), "[a, b]");
        let named = ConfigValue::Artifact(Artifact::named("pkgs.foo"));
        assert_eq!(format_value(&named), "<artifact pkgs.foo>");
    }

    #[test]
    fn artifact_name_reporting() {
        assert_eq!(Artifact::named("pkgs.foo").name(), Some("pkgs.foo"));
        assert_eq!(Artifact::anonymous().name(), None);
    }

    #[test]
    fn datetime_becomes_string() {
        let t = tree("built = 2024-01-01T00:00:00Z");
        assert!(matches!(t["built"], ConfigValue::String(_)));
    }
}
