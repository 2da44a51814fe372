//! # docfig demo
//!
//! A sample documentation pass that showcases how to integrate
//! [docfig](https://docs.rs/docfig) into a system builder. This is **not** a
//! real build system — it exists purely to demonstrate and manually verify
//! docfig's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example manual_demo
//! ```
//!
//! The demo builds a small raw configuration tree with two package artifacts
//! grafted in, authors three fragments (one unconditional, one gated on the
//! dev toggle, one carrying an assertion), assembles the documentation pass,
//! and prints the install directives plus a plain-text manual.

use docfig::tree::{self, from_toml_str};
use docfig::{Artifact, ConfigValue, DocBuild, DocSettings, Fragment, ManualRenderer, assemble};

// ---------------------------------------------------------------------------
// Raw configuration tree
// ---------------------------------------------------------------------------

/// Build the kind of tree the package side hands over: plain settings with
/// opaque build artifacts embedded where the real system would have store
/// outputs.
fn raw_tree() -> ConfigValue {
    let mut root = from_toml_str(
        r#"
        hostname = "demo-box"
        [pkgs]
        release = "24.05"
        "#,
    )
    .expect("demo tree is valid TOML");

    tree::set(
        &mut root,
        "pkgs.man-db",
        ConfigValue::Artifact(Artifact::anonymous()),
    );
    tree::set(
        &mut root,
        "pkgs.texinfo",
        ConfigValue::Artifact(Artifact::named("store.texinfo-7.1")),
    );
    ConfigValue::Table(root)
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

fn fragments() -> Vec<Fragment> {
    vec![
        // Site policy: man page lookups should be fast.
        Fragment::new(
            "fast-man-lookup",
            from_toml_str("[man]\ngenerate_caches = true").expect("valid TOML"),
        ),
        // Only pull in developer documentation when the dev toggle is on.
        Fragment::new(
            "dev-docs",
            from_toml_str(r#"extra_packages = ["man-pages-dev"]"#).expect("valid TOML"),
        )
        .when(|base| {
            tree::get(base, "dev.enable")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        }),
        // Caches are pointless without man pages; say so before rendering.
        Fragment::new(
            "cache-sanity",
            from_toml_str("").expect("valid TOML"),
        )
        .assert(
            |merged| {
                let man = tree::get(merged, "man.enable").and_then(|v| v.as_bool());
                let caches = tree::get(merged, "man.generate_caches").and_then(|v| v.as_bool());
                man == Some(true) || caches != Some(true)
            },
            "man.generate_caches requires man.enable",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// A minimal plain-text renderer: one line per declared option, then the
/// scrubbed tree. A real implementation would emit HTML or man sources.
struct PlainText;

impl ManualRenderer for PlainText {
    type Error = std::convert::Infallible;

    fn render(&self, build: &DocBuild) -> Result<String, Self::Error> {
        let mut out = String::from("# Configuration options\n\n");
        for spec in &build.specs {
            out.push_str(&format!("## {}\n", spec.path));
            for line in &spec.doc {
                out.push_str(&format!("{line}\n"));
            }
            out.push('\n');
        }

        out.push_str("# System configuration (render-safe)\n\n");
        if let Some(table) = build.options.as_table() {
            for (key, value) in tree::entries(table) {
                out.push_str(&format!("{key} = {}\n", format_scrubbed(&value)));
            }
        }
        Ok(out)
    }
}

fn format_scrubbed(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Integer(i) => i.to_string(),
        ConfigValue::Float(f) => f.to_string(),
        ConfigValue::Boolean(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let build = assemble::<DocSettings>(&raw_tree(), &fragments()).unwrap_or_else(|e| {
        eprintln!("Documentation pass failed:\n{e}");
        std::process::exit(1);
    });

    println!("install man pages:   {}", build.directives.man_pages);
    println!("install info pages:  {}", build.directives.info_pages);
    println!("install HTML docs:   {}", build.directives.html_docs);
    println!("extra packages:      {:?}", build.directives.extra_packages);
    println!();

    let manual = build
        .render_with(&PlainText)
        .expect("plain-text rendering cannot fail");
    println!("{manual}");
}
