use crate::error::AppError;
use crate::models::location::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

pub fn haversine_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_km(a, b) * 1_000.0
}

/// Rejects non-finite values and anything outside lat [-90, 90], lng [-180, 180].
pub fn validate(point: &Coordinate) -> Result<(), AppError> {
    if !point.lat.is_finite() || !point.lng.is_finite() {
        return Err(AppError::InvalidCoordinate(format!(
            "coordinate must be finite, got ({}, {})",
            point.lat, point.lng
        )));
    }

    if !(-90.0..=90.0).contains(&point.lat) {
        return Err(AppError::InvalidCoordinate(format!(
            "latitude {} out of range [-90, 90]",
            point.lat
        )));
    }

    if !(-180.0..=180.0).contains(&point.lng) {
        return Err(AppError::InvalidCoordinate(format!(
            "longitude {} out of range [-180, 180]",
            point.lng
        )));
    }

    Ok(())
}
