//! Core composition pipeline: fold conditional fragments over a base tree and
//! produce the canonical resolved settings object.
//!
//! Operates on in-memory values with no I/O, making the full pipeline
//! testable with synthetic inputs. Steps:
//!
//! 1. Evaluate each fragment's condition once against the base
//! 2. Deep-merge active payloads in declaration order (tables recurse,
//!    lists append, scalars overwrite)
//! 3. Run every active fragment's assertions against the merged tree
//! 4. Collect all assertion failures — any failure rejects the whole pass

use tracing::debug;

use crate::error::{AssertionFailure, CompositionError};
use crate::fragment::Fragment;
use crate::merge::deep_merge;
use crate::tree::{self, ConfigValue, Tree};

/// Compose a base tree with an ordered sequence of fragments.
///
/// Deterministic: the same base and fragment sequence always produce the same
/// result. Either a full [`ResolvedConfig`] is returned or, when any active
/// assertion fails, a [`CompositionError`] carrying every failure — never a
/// partial merge.
pub fn compose(base: Tree, fragments: &[Fragment]) -> Result<ResolvedConfig, CompositionError> {
    // 1: conditions are evaluated once, against the base only
    let (active, inactive): (Vec<&Fragment>, Vec<&Fragment>) =
        fragments.iter().partition(|fragment| fragment.is_active(&base));
    for fragment in &inactive {
        debug!(fragment = fragment.name(), "fragment inactive, skipped");
    }

    // 2: declaration-order fold; later fragments win on scalar conflicts
    let mut merged = base;
    for fragment in &active {
        debug!(fragment = fragment.name(), "merging fragment payload");
        merged = deep_merge(merged, fragment.payload().clone());
    }

    // 3-4: all assertions, all failures
    let failures: Vec<AssertionFailure> = active
        .iter()
        .flat_map(|fragment| fragment.failed_assertions(&merged))
        .collect();
    if !failures.is_empty() {
        debug!(count = failures.len(), "composition rejected by assertions");
        return Err(CompositionError { failures });
    }

    Ok(ResolvedConfig { tree: merged })
}

/// The single merged settings tree produced by a composition pass.
///
/// Read-only: downstream consumers query it, they never mutate it. Any change
/// requires re-running [`compose`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    tree: Tree,
}

impl ResolvedConfig {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Look up a value by dotted key path.
    pub fn get(&self, dotted_key: &str) -> Option<&ConfigValue> {
        tree::get(&self.tree, dotted_key)
    }

    pub fn bool_at(&self, dotted_key: &str) -> Option<bool> {
        self.get(dotted_key).and_then(ConfigValue::as_bool)
    }

    pub fn str_at(&self, dotted_key: &str) -> Option<&str> {
        self.get(dotted_key).and_then(ConfigValue::as_str)
    }

    pub fn integer_at(&self, dotted_key: &str) -> Option<i64> {
        self.get(dotted_key).and_then(ConfigValue::as_integer)
    }

    pub fn list_at(&self, dotted_key: &str) -> Option<&[ConfigValue]> {
        self.get(dotted_key).and_then(ConfigValue::as_list)
    }

    /// The string elements of a list-valued key. Missing keys and non-string
    /// elements yield nothing.
    pub fn string_list_at(&self, dotted_key: &str) -> Vec<String> {
        self.list_at(dotted_key)
            .unwrap_or_default()
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// All settings as flattened dotted key-value pairs, formatted for display.
    pub fn entries(&self) -> Vec<(String, String)> {
        tree::entries(&self.tree)
            .into_iter()
            .map(|(key, value)| (key, tree::format_value(&value)))
            .collect()
    }
}
