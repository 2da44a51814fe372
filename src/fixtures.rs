#[cfg(test)]
pub mod test {
    use crate::fragment::Fragment;
    use crate::tree::{Artifact, ConfigValue, Tree, from_toml_str, set};

    /// A raw system tree the way the build side hands it over: plain settings
    /// mixed with opaque package artifacts several levels deep.
    pub fn raw_system_tree() -> ConfigValue {
        let mut root = from_toml_str(
            r#"
            hostname = "devbox"
            [docs]
            enable = true
            [pkgs]
            release = "24.05"
            "#,
        )
        .unwrap();
        set(
            &mut root,
            "pkgs.man-db",
            ConfigValue::Artifact(Artifact::anonymous()),
        );
        set(
            &mut root,
            "pkgs.texinfo",
            ConfigValue::Artifact(Artifact::named("store.texinfo-7.1")),
        );
        ConfigValue::Table(root)
    }

    pub fn disable_man_fragment() -> Fragment {
        Fragment::new("disable-man", from_toml_str("[man]\nenable = false").unwrap())
    }

    pub fn disable_all_fragment() -> Fragment {
        Fragment::new("no-docs", from_toml_str("enable = false").unwrap())
    }

    #[test]
    fn raw_tree_carries_artifacts() {
        let root = raw_system_tree();
        let pkgs = root.as_table().unwrap()["pkgs"].as_table().unwrap();
        assert!(pkgs["man-db"].is_artifact());
        assert!(pkgs["texinfo"].is_artifact());
        assert_eq!(pkgs["release"].as_str().unwrap(), "24.05");
    }

    #[test]
    fn fixture_fragments_are_always_active() {
        assert!(disable_man_fragment().is_active(&Tree::new()));
        assert!(disable_all_fragment().is_active(&Tree::new()));
    }
}
