use crate::database::Session;
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery<Connection: Session>: Sync + Send + 'static {
    async fn find_all(&self, con: &mut Connection)
        -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn exists(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookQuery<Connection: Session>: Sync + Send + 'static {
    type BookQuery: BookQuery<Connection>;
    fn book_query(&self) -> &Self::BookQuery;
}
