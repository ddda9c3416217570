pub mod nodes;
pub mod sessions;
pub mod timeline;
