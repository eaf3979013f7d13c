use crate::geo::haversine_meters;
use crate::models::fixed_route::FixedRoute;
use crate::models::location::Coordinate;

/// Picks the first active route whose pickup and dropoff both lie within its
/// tolerance radius. Tighter tolerances are tried first; equal tolerances keep
/// the given order.
pub fn find_fixed_route<'a>(
    routes: &'a [FixedRoute],
    pickup: &Coordinate,
    dropoff: &Coordinate,
) -> Option<&'a FixedRoute> {
    let mut candidates: Vec<&FixedRoute> = routes.iter().filter(|route| route.is_active).collect();
    candidates.sort_by_key(|route| route.tolerance_radius_meters);

    candidates.into_iter().find(|route| within_tolerance(route, pickup, dropoff))
}

fn within_tolerance(route: &FixedRoute, pickup: &Coordinate, dropoff: &Coordinate) -> bool {
    let tolerance = f64::from(route.tolerance_radius_meters);

    haversine_meters(pickup, &route.pickup_coordinates) <= tolerance
        && haversine_meters(dropoff, &route.dropoff_coordinates) <= tolerance
}
