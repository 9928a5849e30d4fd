use super::Vec2D;
use std::f64::consts::{FRAC_PI_2, PI};

const EPS: f64 = 1e-12;

#[test]
fn test_heading_quadrants() {
    assert!(Vec2D::<f64>::new(1.0, 0.0).heading().abs() < EPS);
    assert!((Vec2D::<f64>::new(0.0, 2.0).heading() - FRAC_PI_2).abs() < EPS);
    assert!((Vec2D::<f64>::new(0.0, -3.0).heading() + FRAC_PI_2).abs() < EPS);
    assert!((Vec2D::<f64>::new(-1.0, 0.0).heading() - PI).abs() < EPS);
    assert!(Vec2D::<f64>::new(0.0, 0.0).heading().abs() < EPS);
}

#[test]
fn test_to_and_distance() {
    let a: Vec2D<f64> = Vec2D::new(1.0, 1.0);
    let b = Vec2D::new(4.0, 5.0);
    assert_eq!(a.to(&b), Vec2D::new(3.0, 4.0));
    assert!((a.euclid_distance(&b) - 5.0).abs() < EPS);
    assert!(!Vec2D::<f64>::new(f64::NAN, 0.0).is_finite());
}
