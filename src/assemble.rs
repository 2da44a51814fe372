//! Documentation assembly: orchestrate the composer, the scrubber, and the
//! schema registry into a single render-ready build.
//!
//! The adapter owns no algorithm of its own. It resolves the final toggles
//! from fragments over the schema defaults, sanitizes the raw configuration
//! tree, derives plain installation directives off fixed dotted paths, and
//! packages everything for an external renderer. Rendering itself — HTML,
//! man pages, whatever — lives behind the [`ManualRenderer`] trait and is
//! not this crate's concern.

use confique::Config;
use serde::Serialize;
use tracing::debug;

use crate::compose::{ResolvedConfig, compose};
use crate::error::DocfigError;
use crate::fragment::Fragment;
use crate::schema::{self, OptionSpec};
use crate::scrub::scrub;
use crate::tree::ConfigValue;

/// Everything a renderer needs for one documentation pass.
///
/// `options` is the scrubbed configuration tree: structurally identical to
/// the raw input, with every artifact replaced by a `${...}` placeholder. A
/// renderer never sees a real artifact and must not try to dereference
/// placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct DocBuild {
    pub resolved: ResolvedConfig,
    pub directives: InstallDirectives,
    pub options: ConfigValue,
    pub specs: Vec<OptionSpec>,
}

impl DocBuild {
    pub fn render_with<R: ManualRenderer>(&self, renderer: &R) -> Result<String, R::Error> {
        renderer.render(self)
    }
}

/// The external manual renderer boundary. Implementations turn a [`DocBuild`]
/// into human-readable output; this crate never interprets the result.
pub trait ManualRenderer {
    type Error;

    fn render(&self, build: &DocBuild) -> Result<String, Self::Error>;
}

/// Plain installation directives derived from the resolved settings.
///
/// Simple scalar/list reads off fixed dotted paths, gated by the master
/// `enable` toggle: a disabled documentation stack installs nothing, whatever
/// the per-format toggles say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDirectives {
    pub man_pages: bool,
    pub info_pages: bool,
    pub html_docs: bool,
    pub extra_search_paths: Vec<String>,
    pub extra_packages: Vec<String>,
}

impl InstallDirectives {
    pub fn from_resolved(resolved: &ResolvedConfig) -> Self {
        let enabled = resolved.bool_at("enable").unwrap_or(false);
        Self {
            man_pages: enabled && resolved.bool_at("man.enable").unwrap_or(false),
            info_pages: enabled && resolved.bool_at("info.enable").unwrap_or(false),
            html_docs: enabled && resolved.bool_at("html.enable").unwrap_or(false),
            extra_search_paths: if enabled {
                resolved.string_list_at("man.extra_search_paths")
            } else {
                Vec::new()
            },
            extra_packages: if enabled {
                resolved.string_list_at("extra_packages")
            } else {
                Vec::new()
            },
        }
    }
}

/// Run one documentation pass: compose fragments over schema `C`'s defaults,
/// scrub `raw`, and derive directives.
///
/// All-or-nothing: a composition failure or malformed tree yields an error
/// and no build — downstream consumers never observe a half-merged state.
pub fn assemble<C: Config + Serialize>(
    raw: &ConfigValue,
    fragments: &[Fragment],
) -> Result<DocBuild, DocfigError> {
    let base = schema::defaults_tree::<C>()?;
    let resolved = compose(base, fragments)?;
    let options = scrub(raw)?;
    let specs = schema::option_specs::<C>()?;
    let directives = InstallDirectives::from_resolved(&resolved);
    debug!(
        man = directives.man_pages,
        info = directives.info_pages,
        html = directives.html_docs,
        packages = directives.extra_packages.len(),
        "documentation assembly resolved"
    );
    Ok(DocBuild {
        resolved,
        directives,
        options,
        specs,
    })
}
