//! HTTP server runtime.
//!
//! Serves the router over plain HTTP; TLS is expected to terminate at the
//! hosting platform or a reverse proxy. The server drains in-flight requests
//! on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
