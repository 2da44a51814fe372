//! Option schema registry: turn a confique config struct into queryable
//! option declarations.
//!
//! The struct is the single source of truth — `#[config(default)]` values
//! become the composition base, `///` doc comments become the documentation
//! strings, and `#[config(nested)]` supplies the dotted hierarchy. This
//! module only reads those declarations; it has no runtime behavior of its
//! own.

use std::collections::HashSet;

use confique::Config;
use confique::meta::{FieldKind, Meta};
use serde::Serialize;

use crate::error::DocfigError;
use crate::tree::{self, ConfigValue, Tree, dotted};

/// One declared configuration knob: dotted path, inferred type, default
/// value, and documentation lines. Immutable after extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub path: String,
    /// Inferred from the default value; absent for optional knobs without one.
    pub kind: Option<OptionKind>,
    pub default: Option<ConfigValue>,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Table,
}

impl OptionKind {
    fn of(value: &ConfigValue) -> Option<OptionKind> {
        match value {
            ConfigValue::String(_) => Some(OptionKind::String),
            ConfigValue::Integer(_) => Some(OptionKind::Integer),
            ConfigValue::Float(_) => Some(OptionKind::Float),
            ConfigValue::Boolean(_) => Some(OptionKind::Boolean),
            ConfigValue::List(_) => Some(OptionKind::List),
            ConfigValue::Table(_) => Some(OptionKind::Table),
            ConfigValue::Artifact(_) => None,
        }
    }
}

/// The schema's default values as a [`Tree`] — the base every composition
/// pass starts from.
pub fn defaults_tree<C: Config + Serialize>() -> Result<Tree, DocfigError> {
    let loaded = C::builder().load()?;
    let value = toml::Value::try_from(&loaded).map_err(|e| DocfigError::InvalidValue {
        path: "<defaults>".into(),
        reason: e.to_string(),
    })?;
    match ConfigValue::from(value) {
        ConfigValue::Table(t) => Ok(t),
        _ => Err(DocfigError::InvalidValue {
            path: "<defaults>".into(),
            reason: "schema did not serialize to a table".into(),
        }),
    }
}

/// Extract every declared option from schema `C`, in depth-first declaration
/// order, with defaults and doc comments attached.
pub fn option_specs<C: Config + Serialize>() -> Result<Vec<OptionSpec>, DocfigError> {
    let defaults = defaults_tree::<C>()?;
    let mut specs = Vec::new();
    collect_specs(&C::META, "", &defaults, &mut specs);
    Ok(specs)
}

fn collect_specs(meta: &Meta, prefix: &str, defaults: &Tree, out: &mut Vec<OptionSpec>) {
    for field in meta.fields {
        let path = dotted(prefix, field.name);
        match &field.kind {
            FieldKind::Leaf { .. } => {
                let default = tree::get(defaults, &path).cloned();
                out.push(OptionSpec {
                    kind: default.as_ref().and_then(OptionKind::of),
                    default,
                    doc: field.doc.iter().map(|s| s.to_string()).collect(),
                    path,
                });
            }
            FieldKind::Nested { meta, .. } => {
                collect_specs(meta, &path, defaults, out);
            }
        }
    }
}

/// Collect all valid leaf key paths from a confique `Meta` tree.
///
/// Returns dotted paths like `"enable"`, `"man.generate_caches"`. Section
/// names (nested structs) are excluded — only leaf fields are returned.
pub fn valid_keys(meta: &Meta) -> HashSet<String> {
    let mut keys = HashSet::new();
    collect_keys(meta, "", &mut keys);
    keys
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut HashSet<String>) {
    for field in meta.fields {
        let path = dotted(prefix, field.name);
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(path);
            }
            FieldKind::Nested { meta, .. } => {
                collect_keys(meta, &path, keys);
            }
        }
    }
}

/// Generate a commented TOML template from the schema's doc comments and
/// defaults, for external documentation tooling.
pub fn template<C: Config>() -> String {
    confique::toml::template::<C>(confique::toml::FormatOptions::default())
}
