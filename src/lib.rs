//! # Tessera
//!
//! Randomized grid UV packing for window faces on building facades.
//!
//! Tiling one facade texture over hundreds of windows repeats visibly. Tessera
//! re-packs the UVs of the selected faces into a grid of atlas cells chosen at
//! random, so neighbouring windows sample different parts of the texture.
//!
//! ## Features
//!
//! - **Pure packer**: polygons in, one UV per loop out; no host state
//! - **Injected randomness**: any [`rand::Rng`], seedable for reproducible layouts
//! - **Aspect-preserving**: each face keeps its proportions inside its sub-cell
//! - **Host boundary**: scene, mesh, vertex group and UV layer model with
//!   precondition checks before anything is written
//!
//! ## Quick Start
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::{Point3, Vector3};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! // A 2 × 1 window on the y = 0 wall, facing -Y
//! let window = Polygon::new(
//!     Vector3::new(0.0, -1.0, 0.0),
//!     vec![
//!         Corner::new(0, Point3::new(0.0, 0.0, 0.0)),
//!         Corner::new(1, Point3::new(2.0, 0.0, 0.0)),
//!         Corner::new(2, Point3::new(2.0, 0.0, 1.0)),
//!         Corner::new(3, Point3::new(0.0, 0.0, 1.0)),
//!     ],
//! );
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let uvs = pack(&[window], &PackOptions::default(), &mut rng).unwrap();
//!
//! let (min, max) = uvs.bounding_box().unwrap();
//! // Twice as wide as tall, like the window itself
//! assert!(((max.x - min.x) / (max.y - min.y) - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Baking a Scene Object
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::Point3;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let mut mesh = PolyMesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
//! mesh.vertex_group_mut("Windows").assign_all((0..4).map(VertexId::new), 1.0);
//!
//! let mut scene = Scene::new();
//! let id = scene.add(SceneObject::mesh("Tower", mesh));
//! scene.set_active(Some(id));
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let (bake, options) = (BakeOptions::default(), PackOptions::default());
//! let report = bake_window_uvs(&mut scene, &bake, &options, &mut rng).unwrap();
//! assert_eq!(report.faces, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod scene;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::bake::{bake_window_uvs, BakeOptions, BakeReport};
    pub use crate::algo::pack::{
        pack, pack_with_layout, Corner, LayoutRng, LoopIndex, LoopUvMap, PackOptions, Placement,
        Polygon,
    };
    pub use crate::error::{PackError, Result};
    pub use crate::mesh::{FaceId, LoopId, PolyMesh, VertexId};
    pub use crate::scene::{InteractionMode, ObjectData, Scene, SceneObject};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
