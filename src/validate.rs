//! Strict validation of TOML fragment payloads: detect keys unknown to the
//! settings schema before they silently merge into the result.
//!
//! Uses `serde_ignored` to deserialize into `C::Layer` (all-optional fields)
//! and capture any keys the layer doesn't consume. Every unknown key is
//! reported, not just the first.

use confique::Config;
use serde::Deserialize;

use crate::error::DocfigError;
use crate::tree::{self, Tree};

/// Parse a TOML fragment payload, rejecting keys unknown to schema `C`.
///
/// Returns the payload as a [`Tree`] ready to hand to
/// [`Fragment::new`](crate::Fragment::new).
pub fn validate_payload<C: Config>(content: &str, fragment: &str) -> Result<Tree, DocfigError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: C::Layer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| DocfigError::PayloadParse {
        fragment: fragment.to_string(),
        source: e,
    })?;

    if !unknown_keys.is_empty() {
        return Err(DocfigError::UnknownKeys {
            fragment: fragment.to_string(),
            keys: unknown_keys,
        });
    }

    tree::from_toml_str(content).map_err(|e| DocfigError::PayloadParse {
        fragment: fragment.to_string(),
        source: e,
    })
}
