//! # vorotwo
//!
//! `vorotwo` is a Rust library for planar Voronoi diagrams, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). It implements Fortune's sweep-line algorithm
//! and clips the resulting diagram to an axis-aligned bounding box, so every site owns a
//! closed convex polygon.
//!
//! ## Features
//!
//! - **Sweep line**: O(n log n) construction with a red-black tree beach line and an ordered circle-event queue.
//! - **Clipped output**: Every cell is closed against the box; border half-edges report negative `BOX_ID_*` neighbors.
//! - **Shared topology**: Vertices and edges are shared between neighboring cells, so adjacency can be walked directly.
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//!
//! ## Example
//!
//! See the `demos/` directory for rendering a diagram to SVG.
//!
//! ## Main Interface
//!
//! [`generate`] builds a [`VoronoiDiagram`] from a slice of points. The [`Tessellation`]
//! struct manages a flat generator buffer on top of it and adds Lloyd relaxation.

mod beachline;
mod bounds;
mod cell;
mod constants;
mod diagram;
mod events;
mod geometry;
mod rbtree;
mod tessellation;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::BoxSide;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use cell::Cell;
pub use constants::{CIRCLE_EVENT_EPSILON, EPSILON, VERTEX_GRID};
pub use diagram::{Edge, EdgeId, HalfEdge, VertexId, VoronoiDiagram};
pub use events::SiteEvent;
pub use geometry::Point;
pub use tessellation::{Tessellation, generate};

/// Error type for Voronoi operations
#[derive(Debug, thiserror::Error)]
pub enum VoronoiError {
    #[error("No sites provided")]
    NoSites,

    #[error("Invalid bounding box: min {min:?}, max {max:?}")]
    InvalidBounds { min: [f64; 2], max: [f64; 2] },

    #[error("Site {index} has a non-finite coordinate")]
    NonFiniteSite { index: usize },

    #[error("Site {index} at ({x}, {y}) lies outside the bounding box")]
    SiteOutOfBounds { index: usize, x: f64, y: f64 },

    #[error("Sites {first} and {second} coincide")]
    DuplicateSite { first: usize, second: usize },

    #[error("Cell of site {site} could not be closed against the bounding box")]
    UnclosableCell { site: usize },

    #[error("No diagram has been calculated")]
    NotCalculated,
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
