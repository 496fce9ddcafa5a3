// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Protein cartoon (ribbon) mesh generation.
//!
//! Backbone positions of each chain are interpolated with a Catmull-Rom
//! spline, given a twist-minimizing frame at every sample, and swept with a
//! cross-section profile into colored triangles plus outline segments.
//!
//! # Key entry points
//!
//! - [`structure::load`] - read a PDB / mmCIF file into a [`Model`]
//! - [`pipeline::model_ribbon`] - build the ribbon mesh of every chain
//! - [`pipeline::chain_ribbon`] - build the ribbon mesh of one chain
//! - [`options::Options`] - ribbon, palette and view configuration
//! - [`mesh::Mesh`] - the output, with fitting transforms and OBJ export
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use ribbon::options::{ChainPalette, RibbonOptions};
//! use ribbon::structure::ModelBuilder;
//!
//! let mut builder = ModelBuilder::new();
//! let trace: Vec<DVec3> =
//!     (0..4).map(|i| DVec3::new(f64::from(i), 0.0, 0.0)).collect();
//! let _ = builder.add_ca_trace("A", &trace);
//! let model = builder.finish();
//!
//! let mesh = ribbon::pipeline::model_ribbon(
//!     &model,
//!     &RibbonOptions::flat(1.0, 1),
//!     &ChainPalette::uniform([1.0, 0.0, 0.0]),
//! );
//! assert_eq!(mesh.triangles.len(), 6);
//! assert_eq!(mesh.lines.len(), 2);
//! ```

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod options;
pub mod pipeline;
pub mod structure;
pub mod util;

pub use error::RibbonError;
pub use mesh::Mesh;
pub use structure::Model;
