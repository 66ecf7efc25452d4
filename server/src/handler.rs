use driver::database::{PostgresConfig, PostgresDatabase};
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: &PostgresConfig) -> error_stack::Result<Self, KernelError> {
        Ok(Self::from(Handler::init(config).await?))
    }

    /// A module whose pool points at a closed port and never connects.
    #[cfg(test)]
    pub fn offline() -> Self {
        let config = PostgresConfig::new(
            "postgres://localhost:1/bookshelf",
            1,
            std::time::Duration::from_millis(10),
        );
        let db = PostgresDatabase::connect_lazy(&config).unwrap();
        Self::from(Handler::with_database(db))
    }
}

impl From<Handler> for AppModule {
    fn from(handler: Handler) -> Self {
        Self(Arc::new(handler))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
}

impl Handler {
    pub async fn init(config: &PostgresConfig) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::connect(config).await?;

        Ok(Self { pgpool })
    }

    #[cfg(test)]
    pub fn with_database(pgpool: PostgresDatabase) -> Self {
        Self { pgpool }
    }
}
