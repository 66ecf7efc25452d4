use std::num::ParseIntError;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use clap::{Args, Command, FromArgMatches};
use error_stack::{Report, ResultExt};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Session};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::{DependOnBookModifier, DependOnBookSchema};
use kernel::KernelError;

use crate::error::ConvertError;

pub use self::book::*;

mod book;

/// Connection settings, read from flags or the environment.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct PostgresConfig {
    /// PostgreSQL connection string.
    #[clap(long = "database-url", env = "DATABASE_URL")]
    url: String,
    #[clap(
        long = "database-max-connections",
        env = "DATABASE_MAX_CONNECTIONS",
        default_value = "10"
    )]
    max_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[clap(
        long = "database-acquire-timeout",
        env = "DATABASE_ACQUIRE_TIMEOUT_SECS",
        default_value = "5",
        value_parser = parse_secs
    )]
    acquire_timeout: Duration,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>, max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            max_connections,
            acquire_timeout,
        }
    }

    /// Reads the settings from the environment after loading `.env`.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        dotenvy::dotenv().ok();
        let command = Self::augment_args(Command::new("driver"));
        let matches = command
            .try_get_matches_from(["driver"])
            .convert_error()
            .attach_printable("Invalid postgres configuration")?;
        Self::from_arg_matches(&matches).convert_error()
    }
}

pub fn parse_secs(value: &str) -> Result<Duration, ParseIntError> {
    value.parse().map(Duration::from_secs)
}

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let config = PostgresConfig::from_env()?;
        Self::connect(&config).await
    }

    pub async fn connect(config: &PostgresConfig) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .convert_error()
            .attach_printable("Failed to connect to postgres")?;
        tracing::debug!(
            max_connections = config.max_connections,
            "Postgres pool is ready"
        );
        Ok(Self { pool })
    }

    /// Builds the pool without opening a connection; the first query connects.
    pub fn connect_lazy(config: &PostgresConfig) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy(&config.url)
            .convert_error()
            .attach_printable("Invalid postgres url")?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresConnection> for PostgresDatabase {
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

impl DependOnBookQuery<PostgresConnection> for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier<PostgresConnection> for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnBookSchema<PostgresConnection> for PostgresDatabase {
    type BookSchema = PostgresBookRepository;
    fn book_schema(&self) -> &Self::BookSchema {
        &PostgresBookRepository
    }
}

pub struct PostgresConnection(PoolConnection<Postgres>);

impl Session for PostgresConnection {}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::new(error).change_context(KernelError::Timeout),
            _ => Report::new(error).change_context(KernelError::Internal),
        })
    }
}
