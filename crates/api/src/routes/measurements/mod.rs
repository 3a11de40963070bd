pub mod measurement_routes;

pub use measurement_routes::*;
