#![forbid(unsafe_code)]

pub mod dist;
pub mod error;
pub mod lifecycle;
pub mod medium;
pub mod mobility;
pub mod plan;
pub mod port;
pub mod services;
pub mod tdma;
