#![forbid(unsafe_code)]

pub mod simulation;
pub mod v2x;
