use crate::controller::{Intake, TryIntake};
use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;

// Missing fields decode to their zero value, an id of 0 means "not given".
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    id: i32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    id: i32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
}

// Path ids are read as i64; one outside the i32 column range names no stored book.
#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

fn stored_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        if input.id != 0 {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable(format!("id must not be given on create, got {}", input.id)));
        }
        Ok(CreateBookDto {
            title: input.title,
            description: input.description,
            author: input.author,
        })
    }
}

impl TryIntake<(i64, UpdateBookRequest)> for BookTransformer {
    type To = Option<UpdateBookDto>;
    type Error = Report<KernelError>;
    fn emit(&self, input: (i64, UpdateBookRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        if input.id != 0 && i64::from(input.id) != id {
            return Err(Report::new(KernelError::Invalid).attach_printable(format!(
                "body id {} does not match path id {id}",
                input.id
            )));
        }
        Ok(stored_id(id).map(|id| UpdateBookDto {
            id,
            title: input.title,
            description: input.description,
            author: input.author,
        }))
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = Option<GetBookDto>;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        stored_id(input.id).map(|id| GetBookDto { id })
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = Option<DeleteBookDto>;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        stored_id(input.id).map(|id| DeleteBookDto { id })
    }
}
