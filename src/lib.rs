//! Conditional composition and render-safe scrubbing for documentation
//! settings. Define a schema struct, author fragments, and go.
//!
//! Docfig resolves which documentation a system should carry — man pages,
//! info pages, HTML trees, developer docs — by composing independently
//! authored, conditionally active configuration fragments over typed schema
//! defaults, and produces a sanitized view of the full configuration tree
//! that is safe to hand to a manual renderer. Built on
//! [confique](https://docs.rs/confique) for struct-driven defaults and
//! template generation.
//!
//! ```ignore
//! let build = docfig::assemble::<DocSettings>(&raw_tree, &fragments)?;
//! if build.directives.man_pages { /* install man pages */ }
//! let manual = build.render_with(&my_renderer)?;
//! ```
//!
//! That single call merges every active fragment onto the schema defaults,
//! checks every declared invariant, replaces every build artifact in the raw
//! tree with a `${...}` placeholder, and hands you the directives plus a
//! render-ready bundle.
//!
//! # Why docfig
//!
//! Documentation settings come from many places: compiled defaults, a
//! platform profile ("headless servers skip HTML docs"), feature modules
//! ("the dev profile wants section-3 pages"), site policy. The typical
//! approach wires these by hand — each source pokes at a shared settings
//! object, and the merge semantics live in whatever order the pokes happen
//! to run.
//!
//! Docfig replaces that with two explicit, pure engines:
//!
//! - The **composer** folds an ordered list of fragments — each a partial
//!   settings tree gated on a condition — over the schema defaults, and runs
//!   every active fragment's assertions against the merged result. Merge
//!   order and override semantics are a contract, not an evaluation-order
//!   accident.
//! - The **scrubber** walks the full configuration tree — the one that
//!   contains opaque build artifacts — and substitutes a symbolic
//!   placeholder for every artifact. Documenting a system must never require
//!   building it: the scrubbed tree costs nothing to produce and nothing to
//!   render.
//!
//! # Design: schema struct as source of truth
//!
//! Your settings struct (via confique's `Config` derive) is the schema for
//! everything:
//!
//! - **`#[config(default = ...)]`** values form the composition base — the
//!   lowest layer, always present.
//! - **`///` doc comments** become [`OptionSpec`] documentation strings and
//!   the comments in generated templates.
//! - **`#[config(nested)]`** models the dotted hierarchy fragments target.
//!
//! There is no separate registry file and no chance of the documentation
//! drifting from the code. [`option_specs`] extracts the declarations,
//! [`defaults_tree`] the base, [`template`] a commented TOML rendering.
//!
//! # Composition semantics
//!
//! Fragments apply in declaration order. Each layer is **sparse**: a
//! fragment names only the keys it wants to touch.
//!
//! - Map nodes deep-merge, key by key.
//! - List leaves **append** — "extra packages to install" accumulates
//!   across fragments instead of the last one winning.
//! - Scalar and artifact leaves overwrite; the later fragment wins.
//!
//! Conditions are evaluated exactly once, against the base. Assertions run
//! after the merge, against the result, and **every** failure is collected
//! into one [`CompositionError`] — configuration mistakes get fixed in
//! batches, so reporting them one at a time is poor ergonomics. A failed
//! composition produces no result at all.
//!
//! # Scrubbing
//!
//! [`scrub`] is structure-preserving: the output tree has the same map shape
//! as the input everywhere except at artifact positions, where a
//! `${logical-path}` string stands in. An artifact's logical name is its
//! dotted position unless the artifact reports an intrinsic name, which
//! wins. Placeholders are plain strings, so scrubbing is idempotent, and
//! artifacts are never inspected beyond their identity, so scrubbing never
//! triggers a build.
//!
//! # Assembly
//!
//! [`assemble`] orchestrates both engines for one documentation pass and
//! derives [`InstallDirectives`] — plain booleans and lists read off fixed
//! dotted paths, gated by the master `enable` toggle. Actual rendering lives
//! behind the [`ManualRenderer`] trait; docfig guarantees the renderer only
//! ever sees placeholders, never artifacts.
//!
//! # Error handling
//!
//! All fallible operations return structured errors: [`StructuralError`] for
//! malformed trees (excessive nesting, unnameable artifacts),
//! [`CompositionError`] for violated invariants (all of them, with the
//! declaring fragment named), [`DocfigError`] as the umbrella for schema and
//! payload problems. See the [`error`] module for the full set.

pub mod error;
pub mod tree;

mod assemble;
mod compose;
mod fragment;
pub(crate) mod merge;
mod schema;
mod scrub;
mod settings;
mod validate;

#[cfg(test)]
mod fixtures;

pub use assemble::{DocBuild, InstallDirectives, ManualRenderer, assemble};
pub use compose::{ResolvedConfig, compose};
pub use error::{AssertionFailure, CompositionError, DocfigError, StructuralError};
pub use fragment::Fragment;
pub use schema::{OptionKind, OptionSpec, defaults_tree, option_specs, template, valid_keys};
pub use scrub::{MAX_DEPTH, placeholder, scrub};
pub use settings::{DevSettings, DocSettings, HtmlSettings, InfoSettings, ManSettings};
pub use tree::{Artifact, ConfigValue, Tree};
pub use validate::validate_payload;
