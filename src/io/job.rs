//! JSON records for pack jobs and their results.
//!
//! A job file carries the polygons to pack and, optionally, grid options:
//!
//! ```json
//! {
//!   "options": { "rows": 4, "cols": 4 },
//!   "polygons": [
//!     { "normal": [0, -1, 0],
//!       "corners": [ { "loop": 0, "position": [0, 0, 0] }, ... ] }
//!   ]
//! }
//! ```
//!
//! Missing option fields take their defaults. The result file lists one UV
//! per loop in ascending loop order, plus the seed that produced it.

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::algo::pack::{Corner, LoopIndex, LoopUvMap, PackOptions, Polygon};

/// One polygon corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRecord {
    /// Loop index the UV is written to.
    #[serde(rename = "loop")]
    pub loop_index: LoopIndex,
    /// World-space position.
    pub position: [f64; 3],
}

/// One polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    /// Face normal.
    pub normal: [f64; 3],
    /// Corners in winding order.
    pub corners: Vec<CornerRecord>,
}

impl From<&PolygonRecord> for Polygon {
    fn from(record: &PolygonRecord) -> Self {
        let [nx, ny, nz] = record.normal;
        Polygon::new(
            Vector3::new(nx, ny, nz),
            record
                .corners
                .iter()
                .map(|c| {
                    let [x, y, z] = c.position;
                    Corner::new(c.loop_index, Point3::new(x, y, z))
                })
                .collect(),
        )
    }
}

impl From<&Polygon> for PolygonRecord {
    fn from(polygon: &Polygon) -> Self {
        Self {
            normal: [polygon.normal.x, polygon.normal.y, polygon.normal.z],
            corners: polygon
                .corners
                .iter()
                .map(|c| CornerRecord {
                    loop_index: c.loop_index,
                    position: [c.position.x, c.position.y, c.position.z],
                })
                .collect(),
        }
    }
}

/// Input of a pack run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackJob {
    /// Grid options; defaults for anything left out.
    #[serde(default)]
    pub options: PackOptions,
    /// Polygons to pack.
    pub polygons: Vec<PolygonRecord>,
}

impl PackJob {
    /// Build a job from in-memory polygons.
    pub fn new(options: PackOptions, polygons: &[Polygon]) -> Self {
        Self {
            options,
            polygons: polygons.iter().map(PolygonRecord::from).collect(),
        }
    }

    /// The polygons, converted for the packer.
    pub fn to_polygons(&self) -> Vec<Polygon> {
        self.polygons.iter().map(Polygon::from).collect()
    }
}

/// One packed loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRecord {
    /// Loop index.
    #[serde(rename = "loop")]
    pub loop_index: LoopIndex,
    /// `[u, v]`.
    pub uv: [f64; 2],
}

/// Output of a pack run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UvFile {
    /// Seed used for the layout, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// UVs in ascending loop order.
    pub uvs: Vec<UvRecord>,
}

impl UvFile {
    /// Wrap a packer result.
    pub fn new(seed: Option<u64>, uvs: &LoopUvMap) -> Self {
        Self {
            seed,
            uvs: uvs
                .iter()
                .map(|(loop_index, uv)| UvRecord {
                    loop_index,
                    uv: [uv.x, uv.y],
                })
                .collect(),
        }
    }

    /// Convert back into a [`LoopUvMap`].
    pub fn to_map(&self) -> LoopUvMap {
        self.uvs
            .iter()
            .map(|r| (r.loop_index, Point2::new(r.uv[0], r.uv[1])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_take_defaults() {
        let text = r#"{
            "options": { "rows": 3, "cell_padding": 0.1 },
            "polygons": [
                { "normal": [0, -1, 0],
                  "corners": [
                    { "loop": 0, "position": [0, 0, 0] },
                    { "loop": 1, "position": [1, 0, 0] },
                    { "loop": 2, "position": [1, 0, 1] }
                  ] }
            ]
        }"#;
        let job: PackJob = serde_json::from_str(text).unwrap();

        assert_eq!(job.options.rows, 3);
        assert_eq!(job.options.cols, 5);
        assert_eq!(job.options.cell_padding, 0.1);
        assert_eq!(job.options.subcell_padding, 0.05);

        let polygons = job.to_polygons();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].corners[2].loop_index, 2);
        assert_eq!(polygons[0].corners[2].position, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_options_may_be_omitted() {
        let job: PackJob = serde_json::from_str(r#"{ "polygons": [] }"#).unwrap();
        assert_eq!(job.options, PackOptions::default());
    }

    #[test]
    fn test_uv_file_uses_loop_key() {
        let uvs: LoopUvMap = vec![(3, Point2::new(0.5, 0.25))].into_iter().collect();
        let text = serde_json::to_string(&UvFile::new(None, &uvs)).unwrap();
        assert_eq!(text, r#"{"uvs":[{"loop":3,"uv":[0.5,0.25]}]}"#);
    }
}
