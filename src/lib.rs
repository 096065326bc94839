//! Monte-Carlo Tree Search decision engine for Robocode-style one-on-one
//! robot duels.
//!
//! The crate is split into a deterministic forward simulation of the duel
//! ([`game`]), a scalar reward over simulated states ([`evaluation`]) and a
//! budgeted tree search over both ([`search`]). [`Engine`] is the thin
//! boundary the host battle adapter talks to.

// TODO: Gradually move most of warnings to deny.
#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod config;
pub mod evaluation;
pub mod game;
pub mod geometry;
pub mod search;

mod engine;
pub use engine::Engine;

/// Returns the crate version for startup banners and debugging output.
#[must_use]
pub const fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
