//! UV layout algorithms.
//!
//! - **Packing** ([`pack`]): scatter polygons over a randomized grid of atlas
//!   cells and compute a UV per loop. Pure; all randomness is injected.
//! - **Baking** ([`bake`]): read window faces from the active scene object,
//!   pack them, and write the result into a UV layer.

pub mod bake;
pub mod pack;
