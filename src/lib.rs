pub mod cli_args;
pub mod error;
mod extractor;
mod middleware;
pub mod route;
pub mod server;
pub mod state;
pub mod store;
pub mod types;
