pub mod destinations;
pub mod fixed_routes;
pub mod pricing;
