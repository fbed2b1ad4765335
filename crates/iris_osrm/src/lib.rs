pub mod client;
pub mod route_options;
pub mod travel_mode;
