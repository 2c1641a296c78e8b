//! Trellis core library: document classification and graph assembly.
//!
//! A raw blob is classified by a [`guess::DocumentTypeGuesser`], decoded by
//! the matching [`parse::DocumentParser`], and turned into the
//! [`graph`] primitives a knowledge-graph store merges. The
//! [`pipeline::IngestPipeline`] drives that flow over a [`registry::Registry`].

pub mod config;
pub mod error;
pub mod graph;
pub mod guess;
pub mod parse;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod types;
