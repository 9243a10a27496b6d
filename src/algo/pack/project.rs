//! Tangent-frame projection and fitting into a sub-cell.
//!
//! Faces are projected cylindrically: the horizontal axis follows the face
//! around the vertical world axis and the vertical axis is world up. This
//! suits window faces on building facades, which are close to vertical.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use super::tiling::SubcellSlot;
use super::Polygon;

/// Below this length a normal (or its horizontal part) counts as zero.
const FRAME_EPSILON: f64 = 1e-12;

/// Which projection a polygon ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Horizontal tangent around world up, world up as bitangent.
    Facade,
    /// World X/Y, used when the normal has no horizontal component.
    TopDown,
}

/// A 2D basis in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Maps to the U axis.
    pub tangent: Vector3<f64>,
    /// Maps to the V axis.
    pub bitangent: Vector3<f64>,
    /// How the frame was built.
    pub kind: FrameKind,
}

impl TangentFrame {
    /// Build the frame for a face normal.
    ///
    /// The normal does not need to be unit length. `tangent` is
    /// `-(n × up)` normalized and `bitangent` is `up = (0, 0, 1)`. A normal
    /// parallel to `up`, or of zero length, gets the top-down frame
    /// `(1, 0, 0), (0, 1, 0)` instead.
    ///
    /// ```
    /// use tessera::algo::pack::{FrameKind, TangentFrame};
    /// use nalgebra::Vector3;
    ///
    /// let wall = TangentFrame::from_normal(&Vector3::new(0.0, -3.0, 0.0));
    /// assert_eq!(wall.kind, FrameKind::Facade);
    /// assert!((wall.tangent - Vector3::x()).norm() < 1e-12);
    ///
    /// let roof = TangentFrame::from_normal(&Vector3::z());
    /// assert_eq!(roof.kind, FrameKind::TopDown);
    /// ```
    pub fn from_normal(normal: &Vector3<f64>) -> Self {
        let up = Vector3::z();

        normal
            .try_normalize(FRAME_EPSILON)
            .and_then(|n| n.cross(&up).try_normalize(FRAME_EPSILON))
            .map(|side| Self {
                tangent: -side,
                bitangent: up,
                kind: FrameKind::Facade,
            })
            .unwrap_or_else(Self::top_down)
    }

    /// The fallback frame looking straight down.
    pub fn top_down() -> Self {
        Self {
            tangent: Vector3::x(),
            bitangent: Vector3::y(),
            kind: FrameKind::TopDown,
        }
    }

    /// Project a world-space point into the frame.
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        Point2::new(p.coords.dot(&self.tangent), p.coords.dot(&self.bitangent))
    }
}

/// A polygon flattened into its tangent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    /// The frame used.
    pub kind: FrameKind,
    /// One point per corner, in corner order.
    pub points: Vec<Point2<f64>>,
    /// Lower-left corner of the bounding box.
    pub min: Point2<f64>,
    /// Bounding box size (`scale_x`, `scale_y`).
    pub extent: Vector2<f64>,
}

/// Flatten a polygon.
///
/// The polygon must have at least one corner; the packer checks this up
/// front.
pub fn project_polygon(polygon: &Polygon) -> Projected {
    let frame = TangentFrame::from_normal(&polygon.normal);
    let points: Vec<Point2<f64>> = polygon
        .corners
        .iter()
        .map(|c| frame.project(&c.position))
        .collect();

    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Projected {
        kind: frame.kind,
        points,
        min,
        extent: max - min,
    }
}

/// Footprint of a polygon inside a square of edge `size`.
///
/// The longer axis gets the full `size` and the other one shrinks by the
/// ratio of the extents. Equal extents fall to the second branch, so `y` is
/// treated as the long axis on ties.
pub fn aspect_footprint(extent: &Vector2<f64>, size: f64) -> Vector2<f64> {
    let (sx, sy) = (extent.x, extent.y);
    if sx > sy {
        Vector2::new(size, size * sy / sx)
    } else if sy > 0.0 {
        Vector2::new(size * sx / sy, size)
    } else {
        // Collapsed to a point.
        Vector2::new(0.0, size)
    }
}

#[inline]
fn unit(value: f64, min: f64, scale: f64) -> f64 {
    if scale == 0.0 {
        0.0
    } else {
        (value - min) / scale
    }
}

/// Scale and move a flattened polygon into its sub-cell.
///
/// Returns one UV per corner (in corner order) and the footprint used.
pub fn fit_into_slot(
    projected: &Projected,
    slot: &SubcellSlot,
) -> (Vec<Point2<f64>>, Vector2<f64>) {
    let footprint = aspect_footprint(&projected.extent, slot.size);

    let uvs = projected
        .points
        .iter()
        .map(|p| {
            Point2::new(
                slot.origin.x + footprint.x * unit(p.x, projected.min.x, projected.extent.x),
                slot.origin.y + footprint.y * unit(p.y, projected.min.y, projected.extent.y),
            )
        })
        .collect();

    (uvs, footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::pack::Corner;

    fn facade_rect(width: f64, height: f64) -> Polygon {
        // Faces -Y, spans X and Z.
        Polygon::new(
            Vector3::new(0.0, -1.0, 0.0),
            vec![
                Corner::new(0, Point3::new(0.0, 0.0, 0.0)),
                Corner::new(1, Point3::new(width, 0.0, 0.0)),
                Corner::new(2, Point3::new(width, 0.0, height)),
                Corner::new(3, Point3::new(0.0, 0.0, height)),
            ],
        )
    }

    fn slot(size: f64) -> SubcellSlot {
        SubcellSlot {
            cell: (0, 0),
            slot: (0, 0),
            subdiv: 1,
            origin: Point2::new(0.5, 0.25),
            size,
        }
    }

    #[test]
    fn test_frame_for_unnormalized_wall() {
        let frame = TangentFrame::from_normal(&Vector3::new(5.0, 0.0, 0.0));
        // -(x × z) = -(0, -1, 0) = (0, 1, 0)
        assert!((frame.tangent - Vector3::y()).norm() < 1e-12);
        assert_eq!(frame.bitangent, Vector3::z());
        assert_eq!(frame.kind, FrameKind::Facade);
    }

    #[test]
    fn test_tilted_normal_keeps_world_up() {
        let frame = TangentFrame::from_normal(&Vector3::new(0.0, -1.0, 1.0));
        assert_eq!(frame.kind, FrameKind::Facade);
        assert!((frame.tangent - Vector3::x()).norm() < 1e-12);
        assert_eq!(frame.bitangent, Vector3::z());
    }

    #[test]
    fn test_degenerate_normals_fall_back() {
        let down = TangentFrame::from_normal(&Vector3::new(0.0, 0.0, -2.0));
        assert_eq!(down.kind, FrameKind::TopDown);
        assert_eq!(TangentFrame::from_normal(&Vector3::zeros()).kind, FrameKind::TopDown);
    }

    #[test]
    fn test_projection_extents() {
        let projected = project_polygon(&facade_rect(10.0, 2.0));
        assert_eq!(projected.kind, FrameKind::Facade);
        assert!((projected.extent.x - 10.0).abs() < 1e-12);
        assert!((projected.extent.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wide_polygon_keeps_aspect() {
        let projected = project_polygon(&facade_rect(10.0, 2.0));
        let (uvs, footprint) = fit_into_slot(&projected, &slot(0.1));

        assert!((footprint.x - 0.1).abs() < 1e-12);
        assert!((footprint.y - 0.02).abs() < 1e-12);
        assert!((footprint.x / footprint.y - 5.0).abs() < 1e-9);

        assert!((uvs[0].x - 0.5).abs() < 1e-12 && (uvs[0].y - 0.25).abs() < 1e-12);
        assert!((uvs[2].x - 0.6).abs() < 1e-12 && (uvs[2].y - 0.27).abs() < 1e-12);
    }

    #[test]
    fn test_tall_polygon_keeps_aspect() {
        let footprint = aspect_footprint(&Vector2::new(1.0, 4.0), 0.2);
        assert!((footprint.x - 0.05).abs() < 1e-12);
        assert!((footprint.y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_square_ties_to_y_branch() {
        let footprint = aspect_footprint(&Vector2::new(3.0, 3.0), 0.2);
        assert_eq!(footprint.y, 0.2);
        assert!((footprint.x - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_width_gives_constant_u() {
        // A vertical sliver: every corner projects to the same x.
        let sliver = Polygon::new(
            Vector3::new(0.0, -1.0, 0.0),
            vec![
                Corner::new(0, Point3::new(1.0, 0.0, 0.0)),
                Corner::new(1, Point3::new(1.0, 0.0, 1.0)),
                Corner::new(2, Point3::new(1.0, 0.0, 3.0)),
            ],
        );
        let projected = project_polygon(&sliver);
        assert_eq!(projected.extent.x, 0.0);

        let (uvs, footprint) = fit_into_slot(&projected, &slot(0.1));
        assert_eq!(footprint.x, 0.0);
        for uv in &uvs {
            assert_eq!(uv.x, 0.5);
            assert!(uv.y.is_finite());
        }
        assert!((uvs[2].y - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_point_polygon_is_finite() {
        let dot = Polygon::new(
            Vector3::new(1.0, 0.0, 0.0),
            vec![Corner::new(9, Point3::new(2.0, 2.0, 2.0))],
        );
        let (uvs, _) = fit_into_slot(&project_polygon(&dot), &slot(0.1));
        assert_eq!(uvs, vec![Point2::new(0.5, 0.25)]);
    }
}
