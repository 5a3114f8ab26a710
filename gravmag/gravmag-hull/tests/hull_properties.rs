//! Property-based tests for hull construction.
//!
//! Random point clouds are triangulated and the resulting meshes checked
//! against the hull invariants.
//!
//! Run with: cargo test -p gravmag-hull -- hull_properties

use gravmag_hull::triangulate;
use gravmag_types::Point3;
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn arb_cloud() -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(arb_point(), 4..40)
}

/// Evenly distributed points on a sphere (golden-angle spiral).
fn fibonacci_sphere(n: usize, radius: f64, center: Point3<f64>) -> Vec<Point3<f64>> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let z = -1.0 + 2.0 * (i as f64 + 0.5) / n as f64;
            #[allow(clippy::cast_precision_loss)]
            let phi = golden_angle * i as f64;
            let s = (1.0 - z * z).sqrt();
            Point3::new(
                center.x + radius * s * phi.cos(),
                center.y + radius * s * phi.sin(),
                center.z + radius * z,
            )
        })
        .collect()
}

proptest! {
    /// Every input point lies inside or on the hull.
    #[test]
    fn hull_contains_all_points(cloud in arb_cloud()) {
        let mesh = triangulate(&cloud).unwrap();

        for (pi, p) in cloud.iter().enumerate() {
            for (fi, &[a, _, _]) in mesh.faces.iter().enumerate() {
                let base = mesh.vertices[a as usize];
                let dist = mesh.normals[fi].dot(&(p - base));
                prop_assert!(
                    dist <= 1e-7,
                    "point {} is {:.3e} outside face {}",
                    pi,
                    dist,
                    fi
                );
            }
        }
    }

    /// Winding order and stored normal agree for every face.
    #[test]
    fn orientation_invariant(cloud in arb_cloud()) {
        let mesh = triangulate(&cloud).unwrap();

        for i in 0..mesh.face_count() {
            let winding = mesh.winding_normal(i).unwrap();
            prop_assert!(winding.dot(&mesh.normals[i]) > 0.0, "face {} misoriented", i);
        }
    }

    /// The hull is a closed triangulated surface: every directed edge has
    /// exactly one reversed twin.
    #[test]
    fn hull_is_watertight(cloud in arb_cloud()) {
        let mesh = triangulate(&cloud).unwrap();

        let mut edges = std::collections::HashMap::new();
        for face in &mesh.faces {
            for e in 0..3 {
                let from = face[e];
                let to = face[(e + 1) % 3];
                *edges.entry((from, to)).or_insert(0u32) += 1;
            }
        }
        for (&(from, to), &count) in &edges {
            prop_assert_eq!(count, 1, "duplicate directed edge {} -> {}", from, to);
            prop_assert_eq!(
                edges.get(&(to, from)).copied().unwrap_or(0),
                1,
                "unmatched edge {} -> {}",
                from,
                to
            );
        }
    }

    /// Scaling the cloud by k scales the volume by k^3.
    #[test]
    fn volume_scales_cubically(cloud in arb_cloud(), k in 0.5..4.0f64) {
        let base = triangulate(&cloud).unwrap();
        let scaled_points: Vec<_> = cloud.iter().map(|p| Point3::from(p.coords * k)).collect();
        let scaled = triangulate(&scaled_points).unwrap();

        let expected = k.powi(3) * base.volume;
        let tol = 1e-9 * expected.abs().max(1.0);
        prop_assert!(
            (scaled.volume - expected).abs() <= tol,
            "volume {:.6e} vs expected {:.6e}",
            scaled.volume,
            expected
        );
    }
}

#[test]
fn sphere_cloud_keeps_every_vertex() {
    let n = 200;
    let points = fibonacci_sphere(n, 1.0, Point3::origin());
    let mesh = triangulate(&points).unwrap();

    // Points on a sphere are in convex position: all become hull vertices,
    // giving 2n - 4 triangles.
    assert_eq!(mesh.face_count(), 2 * n - 4);

    let ball = 4.0 / 3.0 * std::f64::consts::PI;
    assert!(mesh.volume < ball, "inscribed hull cannot exceed the ball");
    assert!(
        mesh.volume > 0.95 * ball,
        "hull volume {:.4} too far from ball volume {:.4}",
        mesh.volume,
        ball
    );
}
