//! The documentation settings schema.
//!
//! Declarations only: defaults, hierarchy, and doc strings. The `schema`
//! module extracts [`OptionSpec`](crate::schema::OptionSpec) entries and the
//! composition base from these structs; the `assemble` module reads the
//! resolved toggles off their dotted paths.

use confique::Config;
use serde::{Deserialize, Serialize};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocSettings {
    /// Master switch for documentation support. When disabled, nothing is
    /// installed and no manual is generated, regardless of the per-format
    /// toggles below.
    #[config(default = true)]
    pub enable: bool,

    /// Extra packages whose documentation is installed alongside the
    /// system's own. Accumulates across fragments rather than overriding.
    #[config(default = [])]
    pub extra_packages: Vec<String>,

    /// Manual page settings.
    #[config(nested)]
    pub man: ManSettings,

    /// Info page settings.
    #[config(nested)]
    pub info: InfoSettings,

    /// Browsable HTML documentation settings.
    #[config(nested)]
    pub html: HtmlSettings,

    /// Developer documentation settings.
    #[config(nested)]
    pub dev: DevSettings,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManSettings {
    /// Install manual pages and the `man` command.
    #[config(default = true)]
    pub enable: bool,

    /// Build a page-name index cache so lookup-by-name stays fast on large
    /// installations. Off by default: building the cache costs time on every
    /// configuration change.
    #[config(default = false)]
    pub generate_caches: bool,

    /// Additional search-path fragments consulted when resolving pages.
    /// Accumulates across fragments.
    #[config(default = [])]
    pub extra_search_paths: Vec<String>,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InfoSettings {
    /// Install info pages and the `info` command.
    #[config(default = true)]
    pub enable: bool,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HtmlSettings {
    /// Install HTML documentation trees.
    #[config(default = true)]
    pub enable: bool,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DevSettings {
    /// Install documentation targeted at developers: API references, library
    /// internals, section-3 pages. Off by default for ordinary systems.
    #[config(default = false)]
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let settings = DocSettings::builder().load().unwrap();
        assert!(settings.enable);
        assert!(settings.man.enable);
        assert!(!settings.man.generate_caches);
        assert!(settings.man.extra_search_paths.is_empty());
        assert!(settings.info.enable);
        assert!(settings.html.enable);
        assert!(!settings.dev.enable);
        assert!(settings.extra_packages.is_empty());
    }
}
