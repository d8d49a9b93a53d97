//! `tj-spatial` — neighbour queries over agent positions.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`neighbors`]| `NeighborIndex` (R-tree over one snapshot), `Neighbor`    |
//!
//! The index is rebuilt once per tick from the snapshot positions and then
//! shared read-only by every agent's perception query.

pub mod neighbors;


pub use neighbors::{Neighbor, NeighborIndex};
