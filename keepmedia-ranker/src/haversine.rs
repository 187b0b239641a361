//! Great-circle distance on a spherical Earth.

use geo::Coord;

/// Mean Earth radius, in miles, used for every distance in this crate.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance in miles between two WGS84 positions.
///
/// Coordinates follow the `geo` convention: `x = longitude`, `y = latitude`,
/// both in degrees. The result is symmetric and zero for identical inputs.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use keepmedia_ranker::haversine_miles;
///
/// let philadelphia = Coord { x: -75.0, y: 40.0 };
/// let one_degree_north = Coord { x: -75.0, y: 41.0 };
/// let miles = haversine_miles(philadelphia, one_degree_north);
/// assert!((miles - 69.1).abs() < 0.1);
/// assert_eq!(haversine_miles(philadelphia, philadelphia), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula is inherently floating-point"
)]
pub fn haversine_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let from_lat = from.y.to_radians();
    let to_lat = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();

    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = ((delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().atan2((1.0 - a).sqrt())
}
