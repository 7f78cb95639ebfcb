//! Support utilities that sit beside the value layer.

pub mod log_buffer;

pub use log_buffer::LogBuffer;
