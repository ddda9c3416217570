use serde::Serialize;

/// The allocation handed to one vehicle. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow {
    pub vehicle: usize,
    pub node_id: u64,
    pub address: String,
    pub tdma_offset: f64,
    pub video_port: u16,
    pub server_start: f64,
    pub server_stop: f64,
    pub client_start: f64,
    pub client_stop: f64,
    pub sender_dump: String,
    pub receiver_dump: String,
}
