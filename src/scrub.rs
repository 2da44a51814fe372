//! The artifact scrubber: replace every build-artifact leaf with a symbolic
//! placeholder so the tree can be rendered without evaluating anything.
//!
//! The walk is structure-preserving: map shape and scalar leaves pass through
//! unchanged; only artifact positions differ in the output, where a
//! `${logical-path}` string stands in for the real value. Artifacts are never
//! inspected beyond their identity, so scrubbing stays cheap and free of side
//! effects no matter what producing the artifact would cost.

use tracing::debug;

use crate::error::StructuralError;
use crate::tree::{ConfigValue, Tree, dotted};

/// Maximum nesting depth the scrubber will walk before declaring the input
/// malformed. Owned trees cannot be cyclic, but a runaway generator can still
/// produce pathological nesting; the cap turns that into an error instead of
/// a blown stack.
pub const MAX_DEPTH: usize = 128;

/// The placeholder substituted for an artifact with the given logical name.
pub fn placeholder(name: &str) -> String {
    format!("${{{name}}}")
}

/// Scrub a configuration tree, replacing every artifact with a placeholder.
///
/// Each artifact's logical name is its dotted position in the tree unless the
/// artifact reports an intrinsic name, which wins. An anonymous artifact at
/// the root has neither and is rejected.
///
/// Pure function: the input is not modified, and placeholders are plain
/// strings, so scrubbing an already-scrubbed tree is the identity.
pub fn scrub(root: &ConfigValue) -> Result<ConfigValue, StructuralError> {
    let mut replaced = 0usize;
    let scrubbed = scrub_at(root, "", 0, &mut replaced)?;
    debug!(artifacts = replaced, "scrubbed configuration tree");
    Ok(scrubbed)
}

fn scrub_at(
    node: &ConfigValue,
    path: &str,
    depth: usize,
    replaced: &mut usize,
) -> Result<ConfigValue, StructuralError> {
    if depth > MAX_DEPTH {
        return Err(StructuralError::DepthExceeded {
            path: path.to_string(),
            limit: MAX_DEPTH,
        });
    }

    match node {
        ConfigValue::Artifact(artifact) => {
            let name = match artifact.name() {
                Some(intrinsic) => intrinsic.to_string(),
                None if path.is_empty() => return Err(StructuralError::UnnamedRootArtifact),
                None => path.to_string(),
            };
            *replaced += 1;
            Ok(ConfigValue::String(placeholder(&name)))
        }
        ConfigValue::Table(table) => {
            let mut out = Tree::new();
            for (key, value) in table {
                let child = scrub_at(value, &dotted(path, key), depth + 1, replaced)?;
                out.insert(key.clone(), child);
            }
            Ok(ConfigValue::Table(out))
        }
        ConfigValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(scrub_at(item, &dotted(path, &i.to_string()), depth + 1, replaced)?);
            }
            Ok(ConfigValue::List(out))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Artifact, from_toml_str, get, set};

    fn tree(toml_str: &str) -> Tree {
        from_toml_str(toml_str).unwrap()
    }

    #[test]
    fn positional_name_for_anonymous_artifact() {
        let mut t = tree("[pkgs]\nbar = \"text\"\n");
        set(
            &mut t,
            "pkgs.foo",
            ConfigValue::Artifact(Artifact::anonymous()),
        );

        let scrubbed = scrub(&ConfigValue::Table(t)).unwrap();
        let out = scrubbed.as_table().unwrap();
        assert_eq!(get(out, "pkgs.foo").unwrap().as_str().unwrap(), "${pkgs.foo}");
        assert_eq!(get(out, "pkgs.bar").unwrap().as_str().unwrap(), "text");
    }

    #[test]
    fn intrinsic_name_wins_over_position() {
        let mut t = Tree::new();
        set(
            &mut t,
            "pkgs.foo",
            ConfigValue::Artifact(Artifact::named("store.foo-1.2")),
        );

        let scrubbed = scrub(&ConfigValue::Table(t)).unwrap();
        let out = scrubbed.as_table().unwrap();
        assert_eq!(
            get(out, "pkgs.foo").unwrap().as_str().unwrap(),
            "${store.foo-1.2}"
        );
    }

    #[test]
    fn structure_is_preserved() {
        let mut t = tree(
            r#"
            enable = true
            [man]
            enable = false
            paths = ["a", "b"]
            [info]
            "#,
        );
        set(&mut t, "man.page", ConfigValue::Artifact(Artifact::anonymous()));

        let scrubbed = scrub(&ConfigValue::Table(t.clone())).unwrap();
        let out = scrubbed.as_table().unwrap();

        // Same keys everywhere; only the artifact position differs.
        assert!(out["enable"].as_bool().unwrap());
        assert!(out.contains_key("info"));
        assert!(out["info"].as_table().unwrap().is_empty());
        let man = out["man"].as_table().unwrap();
        assert_eq!(man.len(), t["man"].as_table().unwrap().len());
        assert_eq!(man["page"].as_str().unwrap(), "${man.page}");
        assert_eq!(man["paths"].as_list().unwrap().len(), 2);
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        let t = tree("name = \"x\"\ncount = 3\nrate = 1.5\nflag = false");
        let scrubbed = scrub(&ConfigValue::Table(t.clone())).unwrap();
        assert_eq!(scrubbed, ConfigValue::Table(t));
    }

    #[test]
    fn root_artifact_replaced_wholesale() {
        let root = ConfigValue::Artifact(Artifact::named("system.toplevel"));
        let scrubbed = scrub(&root).unwrap();
        assert_eq!(scrubbed.as_str().unwrap(), "${system.toplevel}");
    }

    #[test]
    fn anonymous_root_artifact_rejected() {
        let root = ConfigValue::Artifact(Artifact::anonymous());
        let err = scrub(&root).unwrap_err();
        assert_eq!(err, StructuralError::UnnamedRootArtifact);
    }

    #[test]
    fn artifact_in_list_gets_index_path() {
        let mut t = Tree::new();
        t.insert(
            "extra".into(),
            ConfigValue::List(vec![
                ConfigValue::from("plain"),
                ConfigValue::Artifact(Artifact::anonymous()),
            ]),
        );

        let scrubbed = scrub(&ConfigValue::Table(t)).unwrap();
        let extra = scrubbed.as_table().unwrap()["extra"].as_list().unwrap();
        assert_eq!(extra[0].as_str().unwrap(), "plain");
        assert_eq!(extra[1].as_str().unwrap(), "${extra.1}");
    }

    #[test]
    fn scrubbing_twice_is_identity() {
        let mut t = Tree::new();
        set(&mut t, "pkgs.foo", ConfigValue::Artifact(Artifact::anonymous()));
        set(&mut t, "pkgs.bar", ConfigValue::from("text"));

        let once = scrub(&ConfigValue::Table(t)).unwrap();
        let twice = scrub(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_table_passes_through() {
        let scrubbed = scrub(&ConfigValue::Table(Tree::new())).unwrap();
        assert_eq!(scrubbed, ConfigValue::Table(Tree::new()));
    }

    #[test]
    fn depth_cap_rejects_pathological_nesting() {
        let mut node = ConfigValue::Boolean(true);
        for _ in 0..(MAX_DEPTH + 2) {
            let mut t = Tree::new();
            t.insert("n".into(), node);
            node = ConfigValue::Table(t);
        }

        let err = scrub(&node).unwrap_err();
        assert!(matches!(err, StructuralError::DepthExceeded { .. }));
    }
}
