//! # md5sum
//!
//! Streamed MD5 checksums for files. The file is read in fixed-size blocks
//! and fed through an incremental hash state, so memory use stays bounded no
//! matter how large the file is.
//!
//! ```no_run
//! let digest = md5sum::utils::md5::compute_md5("myfile.txt")?;
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), md5sum::utils::md5::Md5Error>(())
//! ```
//!
//! MD5 is used here as a content fingerprint, not for anything security
//! sensitive.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Official docs:
//   https://doc.rust-lang.org/nightly/clippy/lints.html
// Useful app to lookup full details of individual lints:
//   https://rust-lang.github.io/rust-clippy/master/index.html
//
// We set base lints to give the fullest, most pedantic feedback possible.
// Though we prefer that they are just warnings during development so that build-denial
// is only enforced in CI.
//
#![warn(
    // `clippy::all` is already on by default. It implies the following:
    //   clippy::correctness code that is outright wrong or useless
    //   clippy::suspicious code that is most likely wrong or useless
    //   clippy::complexity code that does something simple but in a complex way
    //   clippy::perf code that can be written to run faster
    //   clippy::style code that should be written in a more idiomatic way
    clippy::all,

    // It's always good to write as much documentation as possible
    missing_docs,

    // > clippy::pedantic lints which are rather strict or might have false positives
    clippy::pedantic,

    // > new lints that are still under development"
    // (so "nursery" doesn't mean "Rust newbies")
    clippy::nursery,

    // > The clippy::cargo group gives you suggestions on how to improve your Cargo.toml file.
    // > This might be especially interesting if you want to publish your crate and are not sure
    // > if you have all useful information in your Cargo.toml.
    clippy::cargo
)]
// > The clippy::restriction group will restrict you in some way.
// > If you enable a restriction lint for your crate it is recommended to also fix code that
// > this lint triggers on. However, those lints are really strict by design and you might want
// > to #[allow] them in some special cases, with a comment justifying that.
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "See above explanation."
)]
#![warn(clippy::restriction)]
//
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "`criterion` and `clap` pin different versions of some shared deps"
)]
#![allow(
    clippy::std_instead_of_alloc,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::std_instead_of_core,
    reason = "Import items from std instead of core"
)]
#![allow(
    clippy::mod_module_files,
    reason = "Modules with children are laid out as `mod.rs` files"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "The hot path is the read loop, which is dominated by I/O, not call overhead"
)]
#![allow(
    clippy::exhaustive_structs,
    reason = "The public types are small and meant to be matched on by callers"
)]
#![allow(
    clippy::exhaustive_enums,
    reason = "Callers match on every `Md5Error` variant to pick exit codes"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "Long functions are split into smaller private helpers"
)]
#![allow(
    clippy::arithmetic_side_effects,
    reason = "Only byte counters are added up, and those are bounded by file sizes"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered for reading, not alphabetically"
)]

pub mod utils;
