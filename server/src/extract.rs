use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ErrorStatus;

/// [`axum::Json`] that refuses undecodable bodies with 400.
pub struct BookJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for BookJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(BookJson(value))
    }
}

/// [`axum::extract::Path`] that refuses unparsable segments with 400.
pub struct BookPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for BookPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(BookPath(value))
    }
}
