use crate::KernelError;

/// A handle to the database that lives for the duration of one operation.
///
/// Dropping the handle gives the underlying connection back to its pool.
pub trait Session: 'static + Send {}

#[async_trait::async_trait]
pub trait DatabaseConnection<Connection: Session>: 'static + Sync + Send {
    async fn transact(&self) -> error_stack::Result<Connection, KernelError>;
}

pub trait DependOnDatabaseConnection<Connection: Session>: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection<Connection>;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<Connection, T> DependOnDatabaseConnection<Connection> for T
where
    Connection: Session,
    T: DatabaseConnection<Connection>,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}
