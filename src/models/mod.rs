pub mod destination;
pub mod event;
pub mod fare;
pub mod fixed_route;
pub mod location;
pub mod pricing;
