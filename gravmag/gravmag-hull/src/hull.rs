//! Incremental convex hull construction.
//!
//! Beneath-beyond insertion: faces that see a candidate point are removed
//! and the opening is re-fanned from the horizon to the point. Winding stays
//! outward-consistent throughout, and a final fix-up pass re-derives every
//! stored normal from the actual winding.

use gravmag_types::OrientedMesh;
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{HullError, HullResult};

/// A hull face under construction: vertex indices wound CCW seen from
/// outside, plus the unit outward normal of its supporting plane.
#[derive(Debug, Clone, Copy)]
struct HullFace {
    verts: [usize; 3],
    normal: Vector3<f64>,
}

/// Triangulate the convex hull of a point cloud.
///
/// Returns an [`OrientedMesh`] whose vertex array is the input cloud as
/// given; `faces` index into it and interior points are never referenced.
/// Every face is wound CCW seen from outside and carries a matching outward
/// unit normal; `volume` is the enclosed volume of the hull.
///
/// # Errors
///
/// - [`HullError::InsufficientPoints`] for fewer than 4 points
/// - [`HullError::DegenerateGeometry`] when the cloud is coincident,
///   collinear or coplanar and spans no 3-D volume
/// - [`HullError::NonFiniteCoordinate`] when an input coordinate is NaN or
///   infinite
///
/// # Example
///
/// ```
/// use gravmag_hull::triangulate;
/// use gravmag_types::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let mesh = triangulate(&points).unwrap();
/// assert_eq!(mesh.face_count(), 4);
/// assert!((mesh.volume - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn triangulate(points: &[Point3<f64>]) -> HullResult<OrientedMesh> {
    if points.len() < 4 {
        return Err(HullError::InsufficientPoints {
            required: 4,
            actual: points.len(),
        });
    }
    for (index, p) in points.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(HullError::NonFiniteCoordinate { index });
        }
    }

    let epsilon = tolerance(points);
    let hull_faces = build_hull(points, epsilon)?;
    let (faces, normals) = orient_faces(points, &hull_faces)?;
    let volume = enclosed_volume(points, &faces);

    debug!(
        "convex hull: {} faces over {} points, volume {:.6e}",
        faces.len(),
        points.len(),
        volume
    );

    Ok(OrientedMesh {
        vertices: points.to_vec(),
        faces,
        normals,
        volume,
    })
}

/// Scale-relative tolerance for visibility and degeneracy predicates.
fn tolerance(points: &[Point3<f64>]) -> f64 {
    let mut max_abs = Vector3::<f64>::zeros();
    for p in points {
        max_abs.x = max_abs.x.max(p.x.abs());
        max_abs.y = max_abs.y.max(p.y.abs());
        max_abs.z = max_abs.z.max(p.z.abs());
    }
    3.0 * f64::EPSILON * (max_abs.x + max_abs.y + max_abs.z)
}

/// Pick four affinely independent seed points: the widest axis-extreme
/// pair, the point farthest from their line, then the point farthest from
/// the resulting plane.
fn seed_tetrahedron(points: &[Point3<f64>], epsilon: f64) -> HullResult<[usize; 4]> {
    let mut lo = [0usize; 3];
    let mut hi = [0usize; 3];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[lo[axis]][axis] {
                lo[axis] = i;
            }
            if p[axis] > points[hi[axis]][axis] {
                hi[axis] = i;
            }
        }
    }

    let extremes = [lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]];
    let (mut a, mut b) = (extremes[0], extremes[0]);
    let mut best = 0.0;
    for &i in &extremes {
        for &j in &extremes {
            let d2 = (points[j] - points[i]).norm_squared();
            if d2 > best {
                best = d2;
                a = i;
                b = j;
            }
        }
    }
    if best.sqrt() <= epsilon {
        return Err(HullError::degenerate("all points coincide"));
    }

    let dir = points[b] - points[a];
    let mut c = a;
    let mut best_area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let area = dir.cross(&(p - points[a])).norm();
        if area > best_area {
            best_area = area;
            c = i;
        }
    }
    if best_area <= epsilon * dir.norm() {
        return Err(HullError::degenerate("points are collinear"));
    }

    let plane_normal = dir.cross(&(points[c] - points[a])).normalize();
    let mut d = a;
    let mut best_height = 0.0;
    for (i, p) in points.iter().enumerate() {
        let height = plane_normal.dot(&(p - points[a])).abs();
        if height > best_height {
            best_height = height;
            d = i;
        }
    }
    if best_height <= epsilon {
        return Err(HullError::degenerate("points are coplanar"));
    }

    Ok([a, b, c, d])
}

/// Build a seed face wound so that `opposite` lies behind its plane.
fn oriented_seed_face(
    points: &[Point3<f64>],
    verts: [usize; 3],
    opposite: usize,
    epsilon: f64,
) -> HullResult<HullFace> {
    let [a, b, c] = verts;
    let unit = (points[b] - points[a])
        .cross(&(points[c] - points[a]))
        .try_normalize(epsilon * epsilon)
        .ok_or_else(|| HullError::degenerate("seed face has zero area"))?;

    if unit.dot(&(points[opposite] - points[a])) > 0.0 {
        Ok(HullFace {
            verts: [a, c, b],
            normal: -unit,
        })
    } else {
        Ok(HullFace {
            verts,
            normal: unit,
        })
    }
}

fn build_hull(points: &[Point3<f64>], epsilon: f64) -> HullResult<Vec<HullFace>> {
    let [a, b, c, d] = seed_tetrahedron(points, epsilon)?;
    let mut faces = vec![
        oriented_seed_face(points, [a, b, c], d, epsilon)?,
        oriented_seed_face(points, [a, b, d], c, epsilon)?,
        oriented_seed_face(points, [a, c, d], b, epsilon)?,
        oriented_seed_face(points, [b, c, d], a, epsilon)?,
    ];

    for (index, point) in points.iter().enumerate() {
        if index == a || index == b || index == c || index == d {
            continue;
        }
        insert_point(points, &mut faces, index, *point, epsilon);
    }

    Ok(faces)
}

/// Beneath-beyond insertion of a single point.
///
/// Points within `epsilon` of every face plane are interior and leave the
/// hull untouched.
fn insert_point(
    points: &[Point3<f64>],
    faces: &mut Vec<HullFace>,
    index: usize,
    point: Point3<f64>,
    epsilon: f64,
) {
    let mut visible = vec![false; faces.len()];
    let mut any_visible = false;
    for (i, face) in faces.iter().enumerate() {
        if face.normal.dot(&(point - points[face.verts[0]])) > epsilon {
            visible[i] = true;
            any_visible = true;
        }
    }
    if !any_visible {
        return;
    }

    // Directed edges of the visible region. An edge whose reversed twin is
    // missing from the region lies on the horizon.
    let mut region_edges: HashSet<(usize, usize)> = HashSet::new();
    for (i, face) in faces.iter().enumerate() {
        if visible[i] {
            for e in 0..3 {
                region_edges.insert((face.verts[e], face.verts[(e + 1) % 3]));
            }
        }
    }

    let mut fan = Vec::new();
    for (i, face) in faces.iter().enumerate() {
        if !visible[i] {
            continue;
        }
        for e in 0..3 {
            let from = face.verts[e];
            let to = face.verts[(e + 1) % 3];
            if region_edges.contains(&(to, from)) {
                continue;
            }
            // The horizon edge keeps its direction, so the fan face stays
            // outward-wound.
            let Some(normal) = (points[to] - points[from])
                .cross(&(point - points[from]))
                .try_normalize(epsilon * epsilon)
            else {
                // Sliver within tolerance of the existing hull surface;
                // treat the point as on-hull and keep the current faces.
                return;
            };
            fan.push(HullFace {
                verts: [from, to, index],
                normal,
            });
        }
    }

    let mut keep = visible.iter().map(|&v| !v);
    faces.retain(|_| keep.next().unwrap_or(true));
    faces.extend(fan);
}

/// Winding/normal consistency fix-up.
///
/// Per face, the winding normal (right-hand rule) is compared against the
/// builder's outward plane normal; a negative dot product flips the second
/// and third indices and negates the normal. The corrected winding normal
/// becomes the stored face normal, so winding, stored normal and outward
/// direction all agree regardless of the builder's own convention.
fn orient_faces(
    points: &[Point3<f64>],
    faces: &[HullFace],
) -> HullResult<(Vec<[u32; 3]>, Vec<Vector3<f64>>)> {
    let mut out_faces = Vec::with_capacity(faces.len());
    let mut normals = Vec::with_capacity(faces.len());

    for face in faces {
        let [a, b, c] = face.verts;
        let mut unit = (points[b] - points[a])
            .cross(&(points[c] - points[a]))
            .try_normalize(0.0)
            .ok_or_else(|| HullError::degenerate("hull face has zero area"))?;

        #[allow(clippy::cast_possible_truncation)]
        // Truncation: mesh indices are u32; clouds beyond 4B points are unsupported.
        let mut indices = [a as u32, b as u32, c as u32];
        if unit.dot(&face.normal) < 0.0 {
            indices.swap(1, 2);
            unit = -unit;
        }

        out_faces.push(indices);
        normals.push(unit);
    }

    Ok((out_faces, normals))
}

/// Enclosed volume by the divergence theorem over outward-wound faces.
fn enclosed_volume(points: &[Point3<f64>], faces: &[[u32; 3]]) -> f64 {
    let mut six_vol = 0.0;
    for &[a, b, c] in faces {
        let v0 = points[a as usize].coords;
        let v1 = points[b as usize].coords;
        let v2 = points[c as usize].coords;
        six_vol += v0.dot(&v1.cross(&v2));
    }
    six_vol / 6.0
}
