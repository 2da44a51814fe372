//! Conditionally active configuration fragments.
//!
//! A fragment is an independently-authored partial settings tree, active
//! under a boolean condition, carrying the invariants its author expects the
//! final configuration to satisfy. Fragments are built fluently and are
//! immutable afterwards; the composer only reads them.

use std::fmt;

use crate::error::AssertionFailure;
use crate::tree::Tree;

type Predicate = Box<dyn Fn(&Tree) -> bool + Send + Sync>;

struct Assertion {
    check: Predicate,
    message: String,
}

/// A partial settings tree plus the condition under which it applies.
///
/// ```
/// use docfig::Fragment;
/// use docfig::tree::{self, from_toml_str};
///
/// let payload = from_toml_str("[man]\nenable = false").unwrap();
/// let fragment = Fragment::new("disable-man", payload)
///     .when(|base| tree::get(base, "enable").and_then(|v| v.as_bool()).unwrap_or(false))
///     .assert(
///         |merged| tree::get(merged, "man.enable").and_then(|v| v.as_bool()) == Some(false),
///         "man pages must stay disabled",
///     );
/// assert_eq!(fragment.name(), "disable-man");
/// ```
pub struct Fragment {
    name: String,
    condition: Option<Predicate>,
    payload: Tree,
    assertions: Vec<Assertion>,
}

impl Fragment {
    /// A fragment that is always active. Add a condition with [`when`](Self::when).
    pub fn new(name: impl Into<String>, payload: Tree) -> Self {
        Self {
            name: name.into(),
            condition: None,
            payload,
            assertions: Vec::new(),
        }
    }

    /// Gate this fragment on a condition evaluated against the base tree.
    ///
    /// The condition must be side-effect-free; it is evaluated exactly once
    /// per composition pass.
    pub fn when(mut self, condition: impl Fn(&Tree) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Declare an invariant checked against the merged result when this
    /// fragment is active. Assertions run in declaration order and all
    /// failures are collected, never just the first.
    pub fn assert(
        mut self,
        check: impl Fn(&Tree) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.assertions.push(Assertion {
            check: Box::new(check),
            message: message.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Tree {
        &self.payload
    }

    /// Evaluate this fragment's condition against the base tree.
    pub fn is_active(&self, base: &Tree) -> bool {
        match &self.condition {
            Some(condition) => condition(base),
            None => true,
        }
    }

    pub(crate) fn failed_assertions(&self, merged: &Tree) -> Vec<AssertionFailure> {
        self.assertions
            .iter()
            .filter(|assertion| !(assertion.check)(merged))
            .map(|assertion| AssertionFailure {
                fragment: self.name.clone(),
                message: assertion.message.clone(),
            })
            .collect()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("name", &self.name)
            .field("conditional", &self.condition.is_some())
            .field("payload_keys", &self.payload.len())
            .field("assertions", &self.assertions.len())
            .finish()
    }
}
