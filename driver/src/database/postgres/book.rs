use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::{BookModifier, BookSchema};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookId, BookTitle, NewBook,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PostgresConnection> for PostgresBookRepository {
    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn exists(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::exists(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier<PostgresConnection> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &NewBook,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[async_trait::async_trait]
impl BookSchema<PostgresConnection> for PostgresBookRepository {
    async fn ensure(&self, con: &mut PostgresConnection) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create_table(con).await
    }
}

// Columns are nullable, a NULL string comes back as an empty one.
#[derive(sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            BookId::new(row.id),
            BookTitle::new(row.title.unwrap_or_default()),
            BookDescription::new(row.description.unwrap_or_default()),
            BookAuthor::new(row.author.unwrap_or_default()),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn create_table(con: &mut PgConnection) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS public.books (
                id serial NOT NULL,
                title character varying(100),
                description character varying(1000),
                author character varying(100),
                PRIMARY KEY (id)
            )
            "#,
        )
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, description, author
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, description, author
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(Book::from);
        Ok(found)
    }

    async fn exists(con: &mut PgConnection, id: &BookId) -> error_stack::Result<bool, KernelError> {
        let found = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(found)
    }

    async fn create(con: &mut PgConnection, book: &NewBook) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (title, description, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, author
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.description().as_ref())
        .bind(book.author().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    async fn update(
        con: &mut PgConnection,
        book: &Book,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, description = $3, author = $4
            WHERE id = $1
            RETURNING id, title, description, author
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.description().as_ref())
        .bind(book.author().as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            RETURNING id, title, description, author
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }
}
