pub mod agent;
pub mod bucket;
pub mod services;
