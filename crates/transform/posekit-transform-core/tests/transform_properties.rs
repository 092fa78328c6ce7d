use approx::assert_relative_eq;
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Vector3};
use posekit_transform_core::{Transform, XyzRpy, DEFAULT_EPSILON};

fn sample_poses() -> Vec<Transform> {
    vec![
        Transform::identity(),
        Transform::from_angles_and_position(1.0, -2.0, 0.5, 0.0, 0.0, 0.0),
        Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.3, 0.0, 0.0),
        Transform::from_angles_and_position(0.1, 0.2, 0.3, 0.4, -0.5, 0.6),
        Transform::from_angles_and_position(-3.0, 7.5, 2.25, -2.8, 1.2, 3.0),
    ]
}

#[test]
fn matrix4_round_trip_is_exact() {
    #[rustfmt::skip]
    let m = Matrix4::new(
        0.0, -1.0, 0.0, 4.0,
        1.0,  0.0, 0.0, 5.0,
        0.0,  0.0, 1.0, 6.0,
        0.0,  0.0, 0.0, 1.0,
    );
    assert_eq!(Transform::from_matrix4(&m).to_matrix4(), m);

    for t in sample_poses() {
        let m = t.to_matrix4();
        assert_eq!(Transform::from_matrix4(&m).to_matrix4(), m);
        assert_eq!(Transform::from_rows4(&t.to_rows4()), t);
    }
}

#[test]
fn zero_angles_give_identity_rotation_and_given_translation() {
    for &(x, y, z) in &[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-4.5, 1e6, -1e-6)] {
        let t = Transform::from_angles_and_position(x, y, z, 0.0, 0.0, 0.0);
        let (r, tr) = t.to_rotation_translation();
        assert_eq!(r, Matrix3::identity());
        assert_eq!(tr, Vector3::new(x, y, z));
    }
}

#[test]
fn yaw_then_roll_composition_matches_direct_construction() {
    let (roll, yaw) = (0.7, -1.1);
    let yaw_only = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, 0.0, yaw);
    let roll_only = Transform::from_angles_and_position(0.0, 0.0, 0.0, roll, 0.0, 0.0);
    let direct = Transform::from_angles_and_position(0.0, 0.0, 0.0, roll, 0.0, yaw);

    assert!((yaw_only * roll_only).is_similar_default(&direct));
    // The opposite order is a different rotation.
    assert!(!(roll_only * yaw_only).is_similar_default(&direct));
}

#[test]
fn full_zyx_order_matches_elementary_products() {
    let (roll, pitch, yaw) = (0.25, -0.4, 1.3);
    let rx = Transform::from_angles_and_position(0.0, 0.0, 0.0, roll, 0.0, 0.0);
    let ry = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, pitch, 0.0);
    let rz = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, 0.0, yaw);
    let direct = Transform::from_angles_and_position(0.0, 0.0, 0.0, roll, pitch, yaw);
    assert!((rz * ry * rx).is_similar(&direct, 1e-12));
}

#[test]
fn similarity_is_reflexive_and_symmetric() {
    let poses = sample_poses();
    for a in &poses {
        assert!(a.is_similar_default(a));
        assert!(a.is_similar(a, 0.0));
        for b in &poses {
            assert_eq!(a.is_similar_default(b), b.is_similar_default(a));
        }
    }
}

#[test]
fn similarity_uses_max_abs_difference_against_epsilon() {
    let a = Transform::from_angles_and_position(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    let b = Transform::from_angles_and_position(1.0 + 5e-6, 0.0, 0.0, 0.0, 0.0, 0.0);
    let c = Transform::from_angles_and_position(1.0 + 5e-5, 0.0, 0.0, 0.0, 0.0, 0.0);
    assert!(a.is_similar(&b, DEFAULT_EPSILON));
    assert!(!a.is_similar(&c, DEFAULT_EPSILON));
    assert!(a.is_similar(&c, 1e-4));
    assert_relative_eq!(a.max_abs_diff(&c), 5e-5, epsilon = 1e-12);
}

#[test]
fn identity_checks() {
    assert!(Transform::identity().is_identity_default());
    assert!(Transform::default().is_identity(0.0));
    let tiny_roll = Transform::from_angles_and_position(0.0, 0.0, 0.0, 1e-7, 0.0, 0.0);
    assert!(tiny_roll.is_identity_default());
    let small_offset = Transform::from_angles_and_position(0.0, 0.0, 1e-3, 0.0, 0.0, 0.0);
    assert!(!small_offset.is_identity_default());
}

#[test]
fn affine_encoding_is_row_major_and_round_trips() {
    let t = Transform::from_angles_and_position(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
    let a = t.to_affine();
    assert_eq!(a, [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 1.0, 3.0]);

    for t in sample_poses() {
        assert_eq!(Transform::from_affine(&t.to_affine()), t);
    }
}

#[test]
fn xyzrpy_round_trip_away_from_gimbal_lock() {
    let v = XyzRpy::new(0.5, -1.5, 2.0, 0.3, -0.9, 2.5);
    let back = Transform::from_xyzrpy(v).to_xyzrpy();
    assert_relative_eq!(back.x, v.x, epsilon = 1e-12);
    assert_relative_eq!(back.y, v.y, epsilon = 1e-12);
    assert_relative_eq!(back.z, v.z, epsilon = 1e-12);
    assert_relative_eq!(back.roll, v.roll, epsilon = 1e-9);
    assert_relative_eq!(back.pitch, v.pitch, epsilon = 1e-9);
    assert_relative_eq!(back.yaw, v.yaw, epsilon = 1e-9);
}

#[test]
fn inverse_composes_to_identity() {
    for t in sample_poses() {
        assert!((t * t.inverse()).is_identity(1e-12));
        assert!((t.inverse() * t).is_identity(1e-12));
    }
}

#[test]
fn transform_point_applies_rotation_then_translation() {
    let yaw = std::f64::consts::FRAC_PI_2;
    let t = Transform::from_angles_and_position(1.0, 0.0, 0.0, 0.0, 0.0, yaw);
    let p = t.transform_point(&Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
}

#[test]
fn raw_matrix_injection_is_not_validated() {
    // Uniform scale is not a rotation, but the raw path accepts it unchanged.
    let mut m = Matrix4::identity();
    m[(0, 0)] = 2.0;
    m[(1, 1)] = 2.0;
    m[(2, 2)] = 2.0;
    let t = Transform::from_matrix4(&m);
    assert_eq!(t.to_matrix4(), m);
    assert_relative_eq!(t.rotation_determinant(), 8.0);
    assert!(!t.is_rigid(1e-6));
    assert!(t.orthonormalized().is_identity(1e-9));
}

#[test]
fn isometry_conversion_round_trips_rigid_poses() {
    let t = Transform::from_angles_and_position(0.1, 0.2, 0.3, 0.4, 0.5, 0.6);
    let iso: Isometry3<f64> = t.to_isometry();
    assert!(Transform::from_isometry(&iso).is_similar(&t, 1e-12));
}

#[test]
fn serde_uses_nested_rotation_rows() {
    let t = Transform::from_angles_and_position(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
    let json = serde_json::to_value(t).unwrap();
    assert_eq!(json["translation"], serde_json::json!([1.0, 2.0, 3.0]));
    assert_eq!(json["rotation"][1], serde_json::json!([0.0, 1.0, 0.0]));
    let back: Transform = serde_json::from_value(json).unwrap();
    assert_eq!(back, t);
}
