mod author;
mod description;
mod id;
mod title;

pub use self::{author::*, description::*, id::*, title::*};
use destructure::Destructure;
use vodca::References;

/// A book that has been persisted and therefore owns a database-assigned id.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    description: BookDescription,
    author: BookAuthor,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        description: BookDescription,
        author: BookAuthor,
    ) -> Self {
        Self {
            id,
            title,
            description,
            author,
        }
    }
}

/// The content of a book that has not been stored yet.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewBook {
    title: BookTitle,
    description: BookDescription,
    author: BookAuthor,
}

impl NewBook {
    pub fn new(title: BookTitle, description: BookDescription, author: BookAuthor) -> Self {
        Self {
            title,
            description,
            author,
        }
    }

    pub fn into_book(self, id: BookId) -> Book {
        let DestructNewBook {
            title,
            description,
            author,
        } = self.into_destruct();
        Book::new(id, title, description, author)
    }
}
