pub mod middleware;
pub mod monitors;
pub mod tracing;
