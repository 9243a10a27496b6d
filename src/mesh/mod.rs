//! Host-side mesh data.
//!
//! This module models the parts of a host application's mesh that UV baking
//! touches: vertex positions, n-gon faces split into per-corner loops, named
//! vertex groups, and named per-loop UV layers.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//! - [`LoopId`] - Identifies a face corner; UVs are stored per loop
//!
//! # Construction
//!
//! ```
//! use tessera::mesh::{PolyMesh, VertexId};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 2.0),
//!     Point3::new(0.0, 0.0, 2.0),
//! ];
//! let mut mesh = PolyMesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
//! mesh.vertex_group_mut("Windows").assign_all((0..4).map(VertexId::new), 1.0);
//!
//! let group = mesh.vertex_group("Windows").unwrap();
//! assert_eq!(mesh.faces_in_group(group).len(), 1);
//! ```

mod index;
mod layers;
mod polymesh;

pub use index::{FaceId, LoopId, VertexId};
pub use layers::{UvLayer, VertexGroup};
pub use polymesh::{newell_normal, PolyMesh};
