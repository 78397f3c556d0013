use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use clap::Parser;

use crate::error::ErrorVerbosity;

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Address the HTTP listener binds to.
    #[clap(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port the HTTP listener binds to.
    #[clap(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// MongoDB connection string.
    #[clap(
        long,
        env = "MONGODB_URI",
        default_value = "mongodb://127.0.0.1:27017",
        hide_env_values = true
    )]
    pub mongodb_uri: String,

    /// Database to use when the connection string does not name one.
    #[clap(long, env = "MONGODB_DATABASE", default_value = "books")]
    pub mongodb_database: String,

    /// Directory holding the prebuilt frontend.
    #[clap(long, env = "STATIC_DIR", default_value = "build")]
    pub static_dir: PathBuf,

    /// How much detail error responses carry.
    #[clap(long, env = "ERROR_VERBOSITY", value_enum, default_value_t = ErrorVerbosity::Full)]
    pub error_verbosity: ErrorVerbosity,

    /// Log every response body at trace level.
    #[clap(long, env = "TRACE_RESPONSE_BODY")]
    pub trace_response_body: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "server",
            "--port",
            "8080",
            "--mongodb-database",
            "library",
            "--error-verbosity",
            "status-code",
        ])
        .expect("Arguments must parse");

        assert_eq!(args.port, 8080);
        assert_eq!(args.mongodb_database, "library");
        assert_eq!(args.error_verbosity, ErrorVerbosity::StatusCode);
        assert!(!args.trace_response_body);
    }
}
