pub mod sizing_algorithm;
pub mod sizing_service;
