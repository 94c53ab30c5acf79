pub mod api;
pub mod casino;
