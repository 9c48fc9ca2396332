//! Illustrative connection lines between the rendered layer rows.
//!
//! Topology is pseudo-random but fully determined by a seed, so the picture
//! stays put from one render to the next without storing any edges.

pub mod cache;
pub mod connections;
pub mod geometry;
pub mod seeded;

pub use cache::LayoutCache;
pub use connections::{fan_out, Connection, LayoutPass, SeedPolicy};
pub use geometry::{Geometry, Segment};
pub use seeded::{GeneratorKind, LayoutRng, SineGenerator, StdGenerator, UnitStream};
