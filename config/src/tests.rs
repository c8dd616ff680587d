//! # Tests for Config Constants

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_match_tolerances_exceed_epsilon() {
    assert!(VERTEX_MATCH_DISTANCE > EPSILON);
    assert!(TRIANGLE_MATCH_SQUARED_DISTANCE > EPSILON);
    assert!(BOOLEAN_TOLERANCE > EPSILON);
}

#[test]
fn test_clean_tolerance_is_exact() {
    assert_eq!(CLEAN_TOLERANCE, 0.0);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_defaults_respect_min_sides() {
    assert!(DEFAULT_SPHERE_RESOLUTION >= MIN_SIDES);
    assert!(DEFAULT_TUBE_SIDES >= MIN_SIDES);
}

#[test]
fn test_shape_index_normalizer_matches_sphere() {
    let pi = std::f64::consts::PI;
    let radius = 3.5_f64;
    let area = 4.0 * pi * radius * radius;
    let volume = 4.0 / 3.0 * pi * radius.powi(3);
    let index = area.sqrt() / volume.cbrt() / SHAPE_INDEX_NORMALIZER;
    assert!((index - 1.0).abs() < 1e-8);
}

// =============================================================================
// GEOMETRY CONFIG TESTS
// =============================================================================

#[test]
fn test_geometry_config_default() {
    let config = GeometryConfig::default();
    assert_eq!(config.tolerance, BOOLEAN_TOLERANCE);
    assert_eq!(config.default_sides, DEFAULT_TUBE_SIDES);
}

#[test]
fn test_geometry_config_rejects_bad_values() {
    assert_eq!(
        GeometryConfig::new(-1.0, 8),
        Err(ConfigError::InvalidTolerance(-1.0))
    );
    assert_eq!(
        GeometryConfig::new(1e-6, 2),
        Err(ConfigError::InvalidSides(2))
    );
    assert!(GeometryConfig::new(f64::NAN, 8).is_err());
}

#[test]
fn test_config_error_display() {
    let message = ConfigError::InvalidSides(1).to_string();
    assert!(message.contains("default_sides"));
}
