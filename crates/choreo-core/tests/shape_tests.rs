use choreo_core::{build_silhouette, ChoreoError, SilhouetteParams, TargetSet};
use glam::Vec3;

fn approx(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-3
}

#[test]
fn default_silhouette_has_expected_point_count() {
    let params = SilhouetteParams::default();
    let points = build_silhouette(&params, 0.0, -200.0).unwrap();
    // head ring + left strand + right strand + two arms
    assert_eq!(points.len(), 36 + 75 + 50 + 2 * 25);
    assert_eq!(points.len(), params.point_count());
}

#[test]
fn build_is_deterministic() {
    let params = SilhouetteParams::default();
    let a = build_silhouette(&params, 0.0, -200.0).unwrap();
    let b = build_silhouette(&params, 0.0, -200.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn all_points_lie_in_the_z_plane() {
    let points = build_silhouette(&SilhouetteParams::default(), 13.0, 7.0).unwrap();
    assert!(points.iter().all(|p| p.z == 0.0));
}

#[test]
fn head_ring_is_centred_on_the_offset() {
    let params = SilhouetteParams::default();
    let centre = Vec3::new(30.0, -200.0, 0.0);
    let points = build_silhouette(&params, centre.x, centre.y).unwrap();
    for p in &points[..params.head_points] {
        assert!((p.distance(centre) - params.head_radius).abs() < 1e-3);
    }
    assert!(approx(points[0], centre + Vec3::new(50.0, 0.0, 0.0)));
}

#[test]
fn strands_follow_the_two_segment_stride() {
    let points = build_silhouette(&SilhouetteParams::default(), 0.0, -200.0).unwrap();
    // First interleaved pair sits at the top of the body.
    assert!(approx(points[36], Vec3::new(-50.0, -350.0, 0.0)));
    assert!(approx(points[37], Vec3::new(50.0, -350.0, 0.0)));
    // Last pair above the split uses the upper stride.
    assert!(approx(points[36 + 98], Vec3::new(-50.0, -350.0 + 49.0 * 3.0, 0.0)));
    assert!(approx(points[36 + 99], Vec3::new(50.0, -350.0 + 49.0 * 3.0, 0.0)));
    // Below the split only the left strand continues, shifted and coarser.
    assert!(approx(points[136], Vec3::new(-75.0, -350.0 + 50.0 * 4.0, 0.0)));
    assert!(approx(points[160], Vec3::new(-75.0, -350.0 + 74.0 * 4.0, 0.0)));
}

#[test]
fn arms_come_last_in_left_right_pairs() {
    let points = build_silhouette(&SilhouetteParams::default(), 0.0, -200.0).unwrap();
    assert!(approx(points[161], Vec3::new(-75.0, -350.0, 0.0)));
    assert!(approx(points[162], Vec3::new(75.0, -350.0, 0.0)));
    let last = points.len() - 1;
    assert!(approx(points[last], Vec3::new(75.0, -350.0 + 24.0 * 2.0, 0.0)));
}

#[test]
fn two_figures_do_not_overlap() {
    let params = SilhouetteParams::default();
    let left = build_silhouette(&params, 0.0, -200.0).unwrap();
    let right = build_silhouette(&params, 200.0, -200.0).unwrap();
    for p in &left {
        assert!(
            right.iter().all(|q| p.distance(*q) > 1e-3),
            "shared point {p:?}"
        );
    }
}

#[test]
fn scaling_keeps_counts_and_scales_geometry() {
    let params = SilhouetteParams::default();
    let doubled = params.scaled(2.0);
    assert_eq!(doubled.point_count(), params.point_count());
    assert_eq!(doubled.head_radius, 100.0);

    let base = build_silhouette(&params, 0.0, 0.0).unwrap();
    let big = build_silhouette(&doubled, 0.0, 0.0).unwrap();
    for (a, b) in base.iter().zip(&big) {
        assert!(approx(*a * 2.0, *b));
    }
}

#[test]
fn zero_counts_are_rejected() {
    let params = SilhouetteParams {
        head_points: 0,
        ..SilhouetteParams::default()
    };
    match build_silhouette(&params, 0.0, 0.0) {
        Err(ChoreoError::InvalidShape { field, .. }) => assert_eq!(field, "head_points"),
        other => panic!("expected InvalidShape, got {other:?}"),
    }

    let params = SilhouetteParams {
        arm_points: 0,
        ..SilhouetteParams::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn non_positive_lengths_are_rejected() {
    for radius in [0.0, -5.0, f32::NAN] {
        let params = SilhouetteParams {
            head_radius: radius,
            ..SilhouetteParams::default()
        };
        assert!(
            matches!(
                params.validate(),
                Err(ChoreoError::InvalidShape {
                    field: "head_radius",
                    ..
                })
            ),
            "radius {radius} accepted"
        );
    }
    let negative_scale = SilhouetteParams::default().scaled(-1.0);
    assert!(negative_scale.validate().is_err());
}

#[test]
fn split_beyond_strand_is_rejected() {
    let params = SilhouetteParams {
        strand_split: 80,
        ..SilhouetteParams::default()
    };
    assert!(matches!(
        params.validate(),
        Err(ChoreoError::InvalidShape {
            field: "strand_split",
            ..
        })
    ));
}

#[test]
fn non_finite_offset_is_rejected() {
    let params = SilhouetteParams::default();
    assert!(build_silhouette(&params, f32::INFINITY, 0.0).is_err());
}

#[test]
fn tableau_concatenates_figures_in_order() {
    let params = SilhouetteParams::default();
    let set = TargetSet::tableau(&params, &[[0.0, -200.0], [200.0, -200.0]]).unwrap();
    assert_eq!(set.len(), 2 * params.point_count());
    let first = build_silhouette(&params, 0.0, -200.0).unwrap();
    let second = build_silhouette(&params, 200.0, -200.0).unwrap();
    assert_eq!(&set.points()[..first.len()], first.as_slice());
    assert_eq!(&set.points()[first.len()..], second.as_slice());
}

#[test]
fn empty_target_set() {
    let set = TargetSet::empty();
    assert!(set.is_empty());
    assert_eq!(set.get(0), None);
}
