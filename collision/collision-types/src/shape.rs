//! Shape descriptions handed to narrow-phase backends.
//!
//! The decision core never inspects geometry; these descriptions exist so a
//! backend can construct its own acceleration structures from primitive
//! parameters or an indexed triangle mesh. Scaling and padding are applied
//! here, before construction, so every backend sees the same grown shape.

use nalgebra::{Point3, Vector3};

use crate::{CollisionError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Description of a collision shape.
///
/// # Example
///
/// ```
/// use collision_types::ShapeDescription;
///
/// let sphere = ShapeDescription::Sphere { radius: 0.1 };
/// sphere.validate().unwrap();
///
/// // Grow by 5% scale plus 2mm padding before handing to a backend.
/// let grown = sphere.scaled_and_padded(1.05, 0.002).unwrap();
/// match grown {
///     ShapeDescription::Sphere { radius } => assert!(radius > 0.1),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeDescription {
    /// Sphere with given radius.
    Sphere {
        /// Sphere radius in meters.
        radius: f64,
    },
    /// Box with half-extents along each local axis.
    Box {
        /// Half-extents of the box in each axis.
        half_extents: Vector3<f64>,
    },
    /// Cylinder along the local Z-axis.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Half-length of the cylinder along the Z-axis.
        half_length: f64,
    },
    /// Infinite plane with normal and distance from origin.
    /// The plane equation is: normal · x = offset
    Plane {
        /// Unit normal vector of the plane.
        normal: Vector3<f64>,
        /// Distance from origin along the normal.
        offset: f64,
    },
    /// Indexed triangle mesh in local coordinates.
    TriangleMesh {
        /// Mesh vertices in local coordinates.
        vertices: Vec<Point3<f64>>,
        /// Triangles as vertex index triples.
        indices: Vec<[u32; 3]>,
    },
}

impl ShapeDescription {
    /// The shape category name, for diagnostics and error reporting.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Plane { .. } => "plane",
            Self::TriangleMesh { .. } => "triangle mesh",
        }
    }

    /// Validate the shape parameters.
    ///
    /// Dimensions must be finite and positive; meshes must be non-empty with
    /// all indices in range. A shape that fails here is a configuration
    /// error reported before any evaluation run starts.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Sphere { radius } => {
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(CollisionError::invalid_shape(format!(
                        "sphere radius must be positive and finite, got {radius}"
                    )));
                }
            }
            Self::Box { half_extents } => {
                if half_extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
                    return Err(CollisionError::invalid_shape(format!(
                        "box half-extents must be positive and finite, got {half_extents:?}"
                    )));
                }
            }
            Self::Cylinder {
                radius,
                half_length,
            } => {
                if !radius.is_finite()
                    || *radius <= 0.0
                    || !half_length.is_finite()
                    || *half_length <= 0.0
                {
                    return Err(CollisionError::invalid_shape(format!(
                        "cylinder dimensions must be positive and finite, got radius {radius}, half-length {half_length}"
                    )));
                }
            }
            Self::Plane { normal, offset } => {
                if !offset.is_finite() || normal.iter().any(|c| !c.is_finite()) {
                    return Err(CollisionError::invalid_shape(
                        "plane parameters must be finite",
                    ));
                }
                if normal.norm() <= f64::EPSILON {
                    return Err(CollisionError::invalid_shape(
                        "plane normal must be non-zero",
                    ));
                }
            }
            Self::TriangleMesh { vertices, indices } => {
                if vertices.is_empty() || indices.is_empty() {
                    return Err(CollisionError::invalid_shape("mesh has no geometry"));
                }
                let n = u32::try_from(vertices.len())
                    .map_err(|_| CollisionError::invalid_shape("mesh has too many vertices"))?;
                if indices.iter().flatten().any(|&i| i >= n) {
                    return Err(CollisionError::invalid_shape(
                        "mesh triangle index out of range",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Apply a uniform scale and an absolute padding, returning the grown
    /// shape that backends construct geometry from.
    ///
    /// Primitives scale their dimensions and add the padding to each
    /// boundary. Mesh vertices are scaled about the mesh centroid and then
    /// pushed outward along their direction from it by the padding. Planes
    /// are unbounded and returned unchanged.
    pub fn scaled_and_padded(&self, scale: f64, padding: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CollisionError::invalid_shape(format!(
                "scale must be positive and finite, got {scale}"
            )));
        }
        if !padding.is_finite() {
            return Err(CollisionError::invalid_shape("padding must be finite"));
        }

        let grown = match self {
            Self::Sphere { radius } => Self::Sphere {
                radius: radius * scale + padding,
            },
            Self::Box { half_extents } => Self::Box {
                half_extents: half_extents * scale + Vector3::repeat(padding),
            },
            Self::Cylinder {
                radius,
                half_length,
            } => Self::Cylinder {
                radius: radius * scale + padding,
                half_length: half_length * scale + padding,
            },
            Self::Plane { .. } => self.clone(),
            Self::TriangleMesh { vertices, indices } => {
                let centroid = vertices
                    .iter()
                    .fold(Vector3::zeros(), |acc, v| acc + v.coords)
                    / vertices.len() as f64;
                let grown_vertices = vertices
                    .iter()
                    .map(|v| {
                        let offset = (v.coords - centroid) * scale;
                        let dir = if offset.norm() > f64::EPSILON {
                            offset.normalize()
                        } else {
                            Vector3::zeros()
                        };
                        Point3::from(centroid + offset + dir * padding)
                    })
                    .collect();
                Self::TriangleMesh {
                    vertices: grown_vertices,
                    indices: indices.clone(),
                }
            }
        };

        grown.validate().map_err(|_| {
            CollisionError::invalid_shape(format!(
                "scale {scale} and padding {padding} collapse the {} to a degenerate shape",
                self.kind()
            ))
        })?;
        Ok(grown)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_accepts_reasonable_shapes() {
        assert!(ShapeDescription::Sphere { radius: 0.05 }.validate().is_ok());
        assert!(ShapeDescription::Box {
            half_extents: Vector3::new(0.1, 0.2, 0.3)
        }
        .validate()
        .is_ok());
        assert!(ShapeDescription::Plane {
            normal: Vector3::z(),
            offset: 0.0
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_primitives() {
        let err = ShapeDescription::Sphere { radius: 0.0 }
            .validate()
            .unwrap_err();
        assert!(err.is_invalid_shape());

        let err = ShapeDescription::Cylinder {
            radius: 0.1,
            half_length: f64::NAN,
        }
        .validate()
        .unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn test_validate_rejects_bad_mesh() {
        let err = ShapeDescription::TriangleMesh {
            vertices: vec![],
            indices: vec![],
        }
        .validate()
        .unwrap_err();
        assert!(err.is_invalid_shape());

        let err = ShapeDescription::TriangleMesh {
            vertices: vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            indices: vec![[0, 1, 2]],
        }
        .validate()
        .unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn test_scale_and_pad_sphere() {
        let sphere = ShapeDescription::Sphere { radius: 0.1 };
        let grown = sphere.scaled_and_padded(2.0, 0.01).unwrap();
        match grown {
            ShapeDescription::Sphere { radius } => assert_relative_eq!(radius, 0.21),
            other => panic!("expected sphere, got {}", other.kind()),
        }
    }

    #[test]
    fn test_scale_and_pad_plane_is_identity() {
        let plane = ShapeDescription::Plane {
            normal: Vector3::z(),
            offset: 0.5,
        };
        let grown = plane.scaled_and_padded(3.0, 0.1).unwrap();
        assert_eq!(grown, plane);
    }

    #[test]
    fn test_scale_and_pad_mesh_grows_outward() {
        // Unit segment endpoints around centroid x = 0.5.
        let mesh = ShapeDescription::TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            indices: vec![[0, 1, 2]],
        };
        let grown = mesh.scaled_and_padded(1.0, 0.1).unwrap();
        match grown {
            ShapeDescription::TriangleMesh { vertices, .. } => {
                // Each vertex moved away from the centroid by the padding.
                assert!(vertices[0].x < 0.0);
                assert!(vertices[1].x > 1.0);
                assert!(vertices[2].y > 1.0);
            }
            other => panic!("expected mesh, got {}", other.kind()),
        }
    }

    #[test]
    fn test_negative_padding_cannot_collapse_shape() {
        let sphere = ShapeDescription::Sphere { radius: 0.1 };
        let err = sphere.scaled_and_padded(1.0, -0.2).unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let sphere = ShapeDescription::Sphere { radius: 0.1 };
        assert!(sphere.scaled_and_padded(0.0, 0.0).is_err());
        assert!(sphere.scaled_and_padded(f64::INFINITY, 0.0).is_err());
    }
}
