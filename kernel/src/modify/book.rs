use crate::database::Session;
use crate::entity::{Book, BookId, NewBook};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier<Connection: Session>: 'static + Sync + Send {
    /// Stores `book` and returns it together with the id the database assigned.
    async fn create(
        &self,
        con: &mut Connection,
        book: &NewBook,
    ) -> error_stack::Result<Book, KernelError>;
    /// Replaces every field of the stored book. `None` if no book has that id.
    async fn update(
        &self,
        con: &mut Connection,
        book: &Book,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// Removes the book and hands back what was stored. `None` if no book has that id.
    async fn delete(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
}

pub trait DependOnBookModifier<Connection: Session>: 'static + Sync + Send {
    type BookModifier: BookModifier<Connection>;
    fn book_modifier(&self) -> &Self::BookModifier;
}

#[async_trait::async_trait]
pub trait BookSchema<Connection: Session>: 'static + Sync + Send {
    async fn ensure(&self, con: &mut Connection) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookSchema<Connection: Session>: 'static + Sync + Send {
    type BookSchema: BookSchema<Connection>;
    fn book_schema(&self) -> &Self::BookSchema;
}
