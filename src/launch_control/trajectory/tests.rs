use super::{LauncherGeometry, Orientation, Position3D, TargetPose, TrajectorySolver};
use crate::launch_control::{LaunchError, PoseDefect, Unreachable};
use chrono::Utc;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const EPS: f64 = 1e-9;
const RANDOM_SAMPLES: usize = 500;

fn pose_at(x: f64, y: f64, z: f64) -> TargetPose {
    TargetPose::from_position(Position3D::new(x, y, z), Utc::now())
}

fn default_solver() -> TrajectorySolver { TrajectorySolver::new(LauncherGeometry::default()) }

/// Height of the launched projectile above the launch point after `distance` meters.
fn arc_height(geo: &LauncherGeometry, velocity: f64, distance: f64) -> f64 {
    distance * geo.elevation.tan()
        - geo.gravity * distance.powi(2) / (2.0 * velocity.powi(2) * geo.elevation.cos().powi(2))
}

#[test]
fn test_bearing_zero_target() {
    let solver = default_solver();
    let pose = pose_at(5.0, 0.0, LauncherGeometry::DEF_POSITION.z);
    let sol = solver.solve(&pose).unwrap();
    assert!(sol.yaw().abs() < EPS);
    assert!(sol.velocity() > 0.0 && sol.velocity().is_finite());
}

#[test]
fn test_yaw_follows_launcher_offset() {
    let geometry = LauncherGeometry {
        position: Position3D::new(2.0, 2.0, 0.0),
        ..LauncherGeometry::default()
    };
    let solver = TrajectorySolver::new(geometry);
    assert!((solver.solve_yaw(&pose_at(2.0, 8.0, 0.0)) - FRAC_PI_2).abs() < EPS);
    assert!((solver.solve_yaw(&pose_at(5.0, 5.0, 0.0)) - FRAC_PI_4).abs() < EPS);
    assert!((solver.solve_yaw(&pose_at(2.0, -1.0, 0.0)) + FRAC_PI_2).abs() < EPS);
}

#[test]
fn test_level_shot_matches_range_equation() {
    // On level ground at 45 degrees the range equation reduces to d = v^2 / g.
    let solver = default_solver();
    let geo = *solver.geometry();
    let pose = pose_at(0.0, 9.0, geo.position.z);
    let v = solver.solve_velocity(&pose).unwrap();
    assert!((v.powi(2) / geo.gravity - 9.0).abs() < 1e-6);
}

#[test]
fn test_random_reachable_poses_hit_target() {
    let solver = default_solver();
    let geo = *solver.geometry();
    let mut rng = rand::rng();
    let mut solved = 0;
    for _ in 0..RANDOM_SAMPLES {
        let pose = pose_at(
            rng.random_range(-20.0..20.0),
            rng.random_range(-20.0..20.0),
            rng.random_range(-2.0..4.0),
        );
        match solver.solve(&pose) {
            Ok(sol) => {
                solved += 1;
                assert!(sol.velocity() > 0.0 && sol.velocity().is_finite());
                assert!(sol.velocity() <= geo.max_velocity);
                assert!(sol.yaw() >= geo.yaw_limits.0 && sol.yaw() <= geo.yaw_limits.1);
                let distance = geo.position.planar().euclid_distance(&pose.position().planar());
                let height = pose.position().z - geo.position.z;
                assert!((arc_height(&geo, sol.velocity(), distance) - height).abs() < 1e-6);
            }
            Err(LaunchError::UnreachableTarget(_)) => {}
            Err(e) => panic!("Unexpected solver error {e:?}"),
        }
    }
    assert!(solved > 0, "No random pose was reachable");
}

#[test]
fn test_unreachable_envelope() {
    let solver = default_solver();
    let z0 = LauncherGeometry::DEF_POSITION.z;
    assert!(matches!(
        solver.solve_velocity(&pose_at(0.1, 0.0, z0)),
        Err(Unreachable::TooClose { .. })
    ));
    assert!(matches!(
        solver.solve_velocity(&pose_at(0.0, 0.0, z0)),
        Err(Unreachable::TooClose { .. })
    ));
    assert!(matches!(
        solver.solve_velocity(&pose_at(1000.0, 0.0, z0)),
        Err(Unreachable::BeyondMaxVelocity { .. })
    ));
    // 3m out and 3m up at 45 degrees: the target sits exactly on the launch line.
    assert!(matches!(
        solver.solve_velocity(&pose_at(3.0, 0.0, z0 + 3.0)),
        Err(Unreachable::AboveLaunchLine { .. })
    ));
    assert!(matches!(
        solver.solve_velocity(&pose_at(3.0, 0.0, z0 + 10.0)),
        Err(Unreachable::AboveLaunchLine { .. })
    ));
}

#[test]
fn test_bearing_limits() {
    let geometry = LauncherGeometry {
        yaw_limits: (-FRAC_PI_4, FRAC_PI_4),
        ..LauncherGeometry::default()
    };
    let solver = TrajectorySolver::new(geometry);
    assert!(solver.solve(&pose_at(5.0, 1.0, 0.5)).is_ok());
    assert!(matches!(
        solver.solve(&pose_at(-5.0, 0.0, 0.5)),
        Err(LaunchError::UnreachableTarget(Unreachable::OutsideBearingLimits { .. }))
    ));
}

#[test]
fn test_pose_validation() {
    assert_eq!(pose_at(1.0, 2.0, 3.0).validate(), Ok(()));
    assert_eq!(pose_at(f64::NAN, 2.0, 3.0).validate(), Err(PoseDefect::NonFinitePosition));
    assert_eq!(pose_at(1.0, f64::INFINITY, 3.0).validate(), Err(PoseDefect::NonFinitePosition));
    let broken = Orientation { w: f64::NAN, ..Orientation::IDENTITY };
    let pose = TargetPose::new(Position3D::new(1.0, 1.0, 1.0), broken, Utc::now());
    assert_eq!(pose.validate(), Err(PoseDefect::NonFiniteOrientation));
    let zero = Orientation { w: 0.0, x: 0.0, y: 0.0, z: 0.0 };
    let pose = TargetPose::new(Position3D::new(1.0, 1.0, 1.0), zero, Utc::now());
    assert_eq!(pose.validate(), Err(PoseDefect::DegenerateOrientation));
}

#[test]
fn test_geometry_check() {
    assert!(LauncherGeometry::default().check().is_ok());
    let flat = LauncherGeometry { elevation: 0.0, ..LauncherGeometry::default() };
    assert!(flat.check().is_err());
    let inverted = LauncherGeometry { yaw_limits: (1.0, -1.0), ..LauncherGeometry::default() };
    assert!(inverted.check().is_err());
}
