pub mod cell;
pub mod city_map;
pub mod export;
pub mod matrix_generator;
pub mod matrix_params;
pub mod progress;
pub mod route_service;
pub mod travel_matrix;
pub mod travel_row;

#[cfg(test)]
pub(crate) mod test_utils;
