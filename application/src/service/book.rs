use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Session};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{
    BookModifier, BookSchema, DependOnBookModifier, DependOnBookSchema,
};
use kernel::prelude::entity::{Book, BookId, NewBook};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait PrepareBookService<Connection: Session>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookSchema<Connection>
{
    async fn prepare_book_table(&self) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.book_schema().ensure(&mut connection).await?;
        tracing::debug!("Book table is ready");
        Ok(())
    }
}

impl<Connection: Session, T> PrepareBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookSchema<Connection>
{
}

#[async_trait::async_trait]
pub trait GetBookService<Connection: Session>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        tracing::debug!(count = books.len(), "Listed books");
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }

    async fn exists_book(&self, dto: GetBookDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        self.book_query().exists(&mut connection, &id).await
    }
}

impl<Connection: Session, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateBookService<Connection: Session>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookModifier<Connection>
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = NewBook::from(dto);
        let created = self.book_modifier().create(&mut connection, &book).await?;
        let created = BookDto::from(created);
        tracing::debug!(id = created.id, "Created book");

        Ok(created)
    }
}

impl<Connection: Session, T> CreateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateBookService<Connection: Session>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookModifier<Connection>
{
    async fn update_book(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = dto.id;
        let book = Book::from(dto);
        let updated = self.book_modifier().update(&mut connection, &book).await?;
        if updated.is_none() {
            tracing::debug!(id, "No book to update");
        }

        Ok(updated.map(BookDto::from))
    }
}

impl<Connection: Session, T> UpdateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteBookService<Connection: Session>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookModifier<Connection>
{
    async fn delete_book(
        &self,
        dto: DeleteBookDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let deleted = self.book_modifier().delete(&mut connection, &id).await?;
        if deleted.is_some() {
            tracing::debug!(id = dto.id, "Deleted book");
        }

        Ok(deleted.map(BookDto::from))
    }
}

impl<Connection: Session, T> DeleteBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use error_stack::Report;
    use kernel::interface::database::{DatabaseConnection, Session};
    use kernel::interface::query::{BookQuery, DependOnBookQuery};
    use kernel::interface::update::{
        BookModifier, BookSchema, DependOnBookModifier, DependOnBookSchema,
    };
    use kernel::prelude::entity::{Book, BookId, NewBook};
    use kernel::KernelError;

    use crate::service::{
        CreateBookService, DeleteBookService, GetBookService, PrepareBookService,
        UpdateBookService,
    };
    use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

    struct MemorySession;

    impl Session for MemorySession {}

    #[derive(Default)]
    struct MemoryBooks {
        books: Mutex<BTreeMap<i32, Book>>,
        prepared: Mutex<bool>,
        offline: bool,
    }

    impl MemoryBooks {
        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection<MemorySession> for MemoryBooks {
        async fn transact(&self) -> error_stack::Result<MemorySession, KernelError> {
            if self.offline {
                return Err(Report::new(KernelError::Internal).attach_printable("offline"));
            }
            Ok(MemorySession)
        }
    }

    #[async_trait::async_trait]
    impl BookQuery<MemorySession> for MemoryBooks {
        async fn find_all(
            &self,
            _: &mut MemorySession,
        ) -> error_stack::Result<Vec<Book>, KernelError> {
            Ok(self.books.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(
            &self,
            _: &mut MemorySession,
            id: &BookId,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            Ok(self.books.lock().unwrap().get(&i32::from(*id)).cloned())
        }

        async fn exists(
            &self,
            _: &mut MemorySession,
            id: &BookId,
        ) -> error_stack::Result<bool, KernelError> {
            Ok(self.books.lock().unwrap().contains_key(&i32::from(*id)))
        }
    }

    #[async_trait::async_trait]
    impl BookModifier<MemorySession> for MemoryBooks {
        async fn create(
            &self,
            _: &mut MemorySession,
            book: &NewBook,
        ) -> error_stack::Result<Book, KernelError> {
            let mut books = self.books.lock().unwrap();
            let id = books.keys().next_back().copied().unwrap_or(0) + 1;
            let book = book.clone().into_book(BookId::new(id));
            books.insert(id, book.clone());
            Ok(book)
        }

        async fn update(
            &self,
            _: &mut MemorySession,
            book: &Book,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            let mut books = self.books.lock().unwrap();
            Ok(books
                .get_mut(&i32::from(*book.id()))
                .map(|stored| {
                    *stored = book.clone();
                    stored.clone()
                }))
        }

        async fn delete(
            &self,
            _: &mut MemorySession,
            book_id: &BookId,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            Ok(self.books.lock().unwrap().remove(&i32::from(*book_id)))
        }
    }

    #[async_trait::async_trait]
    impl BookSchema<MemorySession> for MemoryBooks {
        async fn ensure(&self, _: &mut MemorySession) -> error_stack::Result<(), KernelError> {
            *self.prepared.lock().unwrap() = true;
            Ok(())
        }
    }

    impl DependOnBookQuery<MemorySession> for MemoryBooks {
        type BookQuery = Self;
        fn book_query(&self) -> &Self::BookQuery {
            self
        }
    }

    impl DependOnBookModifier<MemorySession> for MemoryBooks {
        type BookModifier = Self;
        fn book_modifier(&self) -> &Self::BookModifier {
            self
        }
    }

    impl DependOnBookSchema<MemorySession> for MemoryBooks {
        type BookSchema = Self;
        fn book_schema(&self) -> &Self::BookSchema {
            self
        }
    }

    fn create_dto(title: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            description: "D".to_string(),
            author: "A".to_string(),
        }
    }

    #[tokio::test]
    async fn prepare_ensures_schema() -> error_stack::Result<(), KernelError> {
        let books = MemoryBooks::default();
        books.prepare_book_table().await?;
        assert!(*books.prepared.lock().unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_id() -> error_stack::Result<(), KernelError> {
        let books = MemoryBooks::default();
        let created = books.create_book(create_dto("T")).await?;

        assert_ne!(created.id, 0);
        assert_eq!(
            created,
            BookDto {
                id: created.id,
                title: "T".to_string(),
                description: "D".to_string(),
                author: "A".to_string(),
            }
        );

        let found = books.get_book(GetBookDto { id: created.id }).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn missing_book_is_none() -> error_stack::Result<(), KernelError> {
        let books = MemoryBooks::default();

        assert_eq!(books.get_book(GetBookDto { id: 999999 }).await?, None);
        assert!(!books.exists_book(GetBookDto { id: 999999 }).await?);
        assert_eq!(books.delete_book(DeleteBookDto { id: 999999 }).await?, None);
        let updated = books
            .update_book(UpdateBookDto {
                id: 999999,
                title: "T".to_string(),
                description: "D".to_string(),
                author: "A".to_string(),
            })
            .await?;
        assert_eq!(updated, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_all_fields() -> error_stack::Result<(), KernelError> {
        let books = MemoryBooks::default();
        let created = books.create_book(create_dto("T")).await?;

        let updated = books
            .update_book(UpdateBookDto {
                id: created.id,
                title: "T2".to_string(),
                description: "D2".to_string(),
                author: "A2".to_string(),
            })
            .await?;
        let expected = BookDto {
            id: created.id,
            title: "T2".to_string(),
            description: "D2".to_string(),
            author: "A2".to_string(),
        };
        assert_eq!(updated, Some(expected.clone()));
        assert_eq!(books.get_all_books().await?, vec![expected]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_prior_record() -> error_stack::Result<(), KernelError> {
        let books = MemoryBooks::default();
        let kept = books.create_book(create_dto("kept")).await?;
        let removed = books.create_book(create_dto("removed")).await?;

        let deleted = books.delete_book(DeleteBookDto { id: removed.id }).await?;
        assert_eq!(deleted, Some(removed.clone()));

        assert!(!books.exists_book(GetBookDto { id: removed.id }).await?);
        assert!(books.exists_book(GetBookDto { id: kept.id }).await?);
        assert_eq!(books.get_all_books().await?, vec![kept]);
        Ok(())
    }

    #[tokio::test]
    async fn connection_failure_propagates() {
        let books = MemoryBooks::offline();

        let report = books.get_all_books().await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);

        let report = books.create_book(create_dto("T")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
