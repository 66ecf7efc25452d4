use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{BookJson, BookPath};
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, UpdateBookRequest,
};
use crate::response::BookPresenter;
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.pgpool().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>,
                 BookJson(req): BookJson<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.pgpool().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule>, BookPath(id): BookPath<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move {
                            match dto {
                                Some(dto) => module.pgpool().get_book(dto).await,
                                None => Ok(None),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule>,
                 BookPath(id): BookPath<i64>,
                 BookJson(req): BookJson<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move {
                            match dto {
                                Some(dto) => module.pgpool().update_book(dto).await,
                                None => Ok(None),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, BookPath(id): BookPath<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move {
                            match dto {
                                Some(dto) => module.pgpool().delete_book(dto).await,
                                None => Ok(None),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .head(
                |State(module): State<AppModule>, BookPath(id): BookPath<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move {
                            match dto {
                                Some(dto) => module.pgpool().exists_book(dto).await,
                                None => Ok(false),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
