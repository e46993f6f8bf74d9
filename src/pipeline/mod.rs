// Relay pipeline: chunking and the Fetch → Chunk → Push run

pub mod chunk;
pub mod relay;

pub use chunk::{chunk_and_plan, chunk_by_size, serialized_len, Chunked};
pub use relay::run_relay;
