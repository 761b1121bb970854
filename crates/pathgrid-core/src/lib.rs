//! **pathgrid-core**: the data model for grid shortest-path search.
//!
//! This crate provides the types the search engine operates on: geometry
//! points, cells with passability and search state, a fixed-size arena
//! [`Grid`] answering 4-way adjacency queries, and an ASCII [`Layout`]
//! format for describing boards as text.
//!
//! Cells refer to each other through [`CellId`] indices into their grid,
//! never through references, so a grid can be reset between searches by a
//! single pass over its cells.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellId};
pub use error::GridError;
pub use geom::Point;
pub use grid::Grid;
pub use layout::{Layout, LayoutError};
