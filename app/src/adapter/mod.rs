pub mod api;
pub mod jenkins;
