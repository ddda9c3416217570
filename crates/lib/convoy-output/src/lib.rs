#![forbid(unsafe_code)]

pub mod logger;
pub mod result;
pub mod tables;
pub mod writer;
