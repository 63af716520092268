//! Spatial filter state and coordinate reprojection.
//!
//! Map clients capture coordinates in their display projection (usually Web
//! Mercator); the search backend expects geographic WGS84. Reprojection
//! happens once, at request build time.

use std::f64::consts::FRAC_PI_2;
#[cfg(test)]
use std::f64::consts::PI;

/// WGS84 / Web Mercator earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Coordinate reference system of captured map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapCrs {
    /// Geographic longitude/latitude (EPSG:4326).
    #[default]
    Wgs84,
    /// Spherical Web Mercator meters (EPSG:3857).
    WebMercator,
}

/// A point in map coordinates (`x` = easting/longitude, `y` = northing/latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Easting (or longitude in WGS84).
    pub x: f64,
    /// Northing (or latitude in WGS84).
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts to geographic `(lon, lat)` degrees, reprojecting if needed.
    pub fn to_wgs84(self, crs: MapCrs) -> (f64, f64) {
        match crs {
            MapCrs::Wgs84 => (self.x, self.y),
            MapCrs::WebMercator => mercator_to_wgs84(self.x, self.y),
        }
    }
}

/// A rectangular extent in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Western edge.
    pub min_x: f64,
    /// Southern edge.
    pub min_y: f64,
    /// Eastern edge.
    pub max_x: f64,
    /// Northern edge.
    pub max_y: f64,
}

/// Converts Web Mercator meters (EPSG:3857) to geographic degrees.
///
/// Returns `(lon, lat)`.
pub fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees();
    (lon, lat)
}

/// The session's spatial constraint: none, distance-from-point, or bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpatialFilter {
    /// No spatial constraint.
    #[default]
    None,
    /// Results within `radius_km` of `center`.
    Distance {
        /// Center point in the session's map CRS.
        center: Point,
        /// Search radius in kilometers.
        radius_km: f64,
    },
    /// Results within a rectangular extent.
    BoundingBox(Bounds),
}

/// Spatial filter plus the CRS its coordinates were captured in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpatialState {
    /// Capture CRS for the filter's coordinates.
    pub crs: MapCrs,
    /// The active spatial filter.
    pub filter: SpatialFilter,
}

impl SpatialState {
    /// A distance filter in the given CRS.
    pub fn distance(crs: MapCrs, center: Point, radius_km: f64) -> Self {
        Self {
            crs,
            filter: SpatialFilter::Distance { center, radius_km },
        }
    }

    /// A bounding-box filter in the given CRS.
    pub fn bounding_box(crs: MapCrs, bounds: Bounds) -> Self {
        Self {
            crs,
            filter: SpatialFilter::BoundingBox(bounds),
        }
    }

    /// Returns true when no spatial constraint is active.
    pub fn is_none(&self) -> bool {
        matches!(self.filter, SpatialFilter::None)
    }
}

/// Half the Web Mercator world extent, for tests.
#[cfg(test)]
pub(crate) const MERCATOR_MAX: f64 = PI * EARTH_RADIUS_M;
