pub mod apps;
pub mod bucket;
pub mod services;
pub mod topology;
