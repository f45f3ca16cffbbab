mod core;
mod http;
mod log_payload;
mod stdio;

pub use core::{PaylineMcpCore, envelope_to_result};
pub use http::{DEFAULT_BIND_ADDRESS, McpHttpServer, RunningMcpHttpServer, resolve_bind_address};
pub use stdio::serve_stdio;
