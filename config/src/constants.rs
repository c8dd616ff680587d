//! # Configuration Constants
//!
//! Centralized constants for the mesh and annotation crates. Geometric
//! tolerances, tessellation defaults, and annotation-store names are all
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Default resolutions for spheres, cones, and tubes
//! - **Mass properties**: Normalization factors
//! - **Annotations**: Store names and bookmark document markers

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance below which a target vertex is considered coincident with a
/// reference vertex during attribute interpolation.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MATCH_DISTANCE;
///
/// let d = 5e-7_f64;
/// assert!(d <= VERTEX_MATCH_DISTANCE);
/// ```
pub const VERTEX_MATCH_DISTANCE: f64 = 1e-6;

/// Squared point-to-triangle distance below which a point counts as lying
/// on a reference triangle during attribute interpolation.
pub const TRIANGLE_MATCH_SQUARED_DISTANCE: f64 = 1e-6;

/// Tolerance used by the boolean set operations when classifying polygons
/// against splitting planes and when welding the result.
///
/// # Example
///
/// ```rust
/// use config::constants::{BOOLEAN_TOLERANCE, EPSILON};
///
/// assert!(BOOLEAN_TOLERANCE > EPSILON);
/// ```
pub const BOOLEAN_TOLERANCE: f64 = 1e-6;

/// Tolerance used by merge when deduplicating vertices.
///
/// Zero means only exactly coincident points are merged.
pub const CLEAN_TOLERANCE: f64 = 0.0;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum number of sides for cones, tubes, and sphere resolutions.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SIDES;
///
/// let requested = 2;
/// assert!(requested < MIN_SIDES);
/// ```
pub const MIN_SIDES: u32 = 3;

/// Default theta and phi resolution of a parametric sphere.
pub const DEFAULT_SPHERE_RESOLUTION: u32 = 8;

/// Default number of sides of a swept tube.
pub const DEFAULT_TUBE_SIDES: u32 = 8;

// =============================================================================
// MASS PROPERTY CONSTANTS
// =============================================================================

/// Divisor that makes the normalized shape index of a sphere equal to one.
///
/// `sqrt(area) / cbrt(volume)` for a sphere is `sqrt(4π) / cbrt(4π/3)`.
///
/// # Example
///
/// ```rust
/// use config::constants::SHAPE_INDEX_NORMALIZER;
///
/// let pi = std::f64::consts::PI;
/// let sphere = (4.0 * pi).sqrt() / (4.0 * pi / 3.0).cbrt();
/// assert!((sphere / SHAPE_INDEX_NORMALIZER - 1.0).abs() < 1e-8);
/// ```
pub const SHAPE_INDEX_NORMALIZER: f64 = 2.199_085_233;

// =============================================================================
// ANNOTATION CONSTANTS
// =============================================================================

/// Data instance holding the per-body synapse summary.
pub const BODY_ANNOTATION_DATA: &str = "annotations";

/// Key under [`BODY_ANNOTATION_DATA`] whose value is a bookmark document.
pub const BODY_SYNAPSES_KEY: &str = "body_synapses";

/// Data instance holding per-body name and status records, keyed by body id.
pub const BODY_RECORD_DATA: &str = "bodies3_annotations";

/// Required value of `metadata.description` in a bookmark document.
pub const BOOKMARK_DESCRIPTION: &str = "bookmarks";

// =============================================================================
// GEOMETRY CONFIG
// =============================================================================

/// Validated snapshot of tunable geometry settings.
///
/// # Examples
/// ```
/// use config::constants::GeometryConfig;
/// let config = GeometryConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Tolerance for coincidence and plane classification.
    pub tolerance: f64,
    /// Side count used when a caller does not pick one.
    pub default_sides: u32,
}

impl GeometryConfig {
    /// Builds a configuration, rejecting a non-positive tolerance or a side
    /// count that cannot form a polygon.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::new(1.0e-5, 12).expect("valid config");
    /// assert_eq!(cfg.default_sides, 12);
    /// assert!(GeometryConfig::new(0.0, 12).is_err());
    /// ```
    pub fn new(tolerance: f64, default_sides: u32) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if default_sides < MIN_SIDES {
            return Err(ConfigError::InvalidSides(default_sides));
        }
        Ok(Self {
            tolerance,
            default_sides,
        })
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tolerance: BOOLEAN_TOLERANCE,
            default_sides: DEFAULT_TUBE_SIDES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Tolerance is zero, negative, or NaN.
    InvalidTolerance(f64),
    /// Side count is below [`MIN_SIDES`].
    InvalidSides(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSides(value) => {
                write!(f, "default_sides must be >= {MIN_SIDES}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
