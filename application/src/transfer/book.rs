use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookId, BookTitle, DestructBook, NewBook,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            description,
            author,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            author: author.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetBookDto {
    pub id: i32,
}

#[derive(Debug)]
pub struct CreateBookDto {
    pub title: String,
    pub description: String,
    pub author: String,
}

impl From<CreateBookDto> for NewBook {
    fn from(value: CreateBookDto) -> Self {
        NewBook::new(
            BookTitle::new(value.title),
            BookDescription::new(value.description),
            BookAuthor::new(value.author),
        )
    }
}

#[derive(Debug)]
pub struct UpdateBookDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: String,
}

impl From<UpdateBookDto> for Book {
    fn from(value: UpdateBookDto) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookDescription::new(value.description),
            BookAuthor::new(value.author),
        )
    }
}

#[derive(Debug)]
pub struct DeleteBookDto {
    pub id: i32,
}
