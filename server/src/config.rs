use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use driver::database::{parse_secs, PostgresConfig};
use driver::error::ConvertError;
use error_stack::ResultExt;
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Parser)]
#[command(author, about, version)]
pub struct ServerConfig {
    /// Port to listen on.
    #[clap(long, env = "SERVER_PORT", default_value = "8080")]
    port: u16,
    /// Seconds a request may take before it is answered with 408.
    #[clap(
        long = "request-timeout",
        env = "REQUEST_TIMEOUT_SECS",
        default_value = "30",
        value_parser = parse_secs
    )]
    request_timeout: Duration,
    /// Directory of the daily log file.
    #[clap(long, env = "LOG_DIR", default_value = "./logs/")]
    log_dir: PathBuf,
    #[clap(flatten)]
    database: PostgresConfig,
}

impl ServerConfig {
    /// Loads `.env`, then reads the process arguments and environment.
    pub fn load() -> error_stack::Result<Self, KernelError> {
        dotenvy::dotenv().ok();
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> error_stack::Result<Self, KernelError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
            .convert_error()
            .attach_printable("Invalid server configuration")
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }

    pub fn database(&self) -> &PostgresConfig {
        &self.database
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;
    use std::time::Duration;

    use driver::database::PostgresConfig;
    use kernel::KernelError;

    use crate::config::ServerConfig;

    const URL: &str = "postgres://localhost/bookshelf";

    #[test]
    fn defaults() {
        let config = ServerConfig::from_args(["bookshelf", "--database-url", URL]).unwrap();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_dir(), &PathBuf::from("./logs/"));
        assert_eq!(
            config.database(),
            &PostgresConfig::new(URL, 10, Duration::from_secs(5))
        );
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_args([
            "bookshelf",
            "--port",
            "9000",
            "--request-timeout",
            "3",
            "--log-dir",
            "/tmp/bookshelf",
            "--database-url",
            URL,
            "--database-max-connections",
            "2",
            "--database-acquire-timeout",
            "1",
        ])
        .unwrap();
        assert_eq!(config.port(), 9000);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.log_dir(), &PathBuf::from("/tmp/bookshelf"));
        assert_eq!(
            config.database(),
            &PostgresConfig::new(URL, 2, Duration::from_secs(1))
        );
    }

    #[test]
    fn invalid_values() {
        for args in [
            ["bookshelf", "--port", "http"],
            ["bookshelf", "--request-timeout", "soon"],
        ] {
            let report = ServerConfig::from_args(args.into_iter().chain(["--database-url", URL]))
                .unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Internal);
        }
    }
}
