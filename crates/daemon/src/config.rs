use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    /// JSON document holding the whole collection.
    pub data_file: PathBuf,
    /// Keep tasks in memory only; `data_file` is ignored.
    pub in_memory: bool,
}
