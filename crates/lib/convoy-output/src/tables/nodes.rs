use serde::Serialize;

/// One node of the visualization trace: where it starts, its address and how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    pub node_id: u64,
    pub kind: String,
    pub address: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub description: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}
