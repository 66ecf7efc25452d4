use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler::AppModule;

pub use self::book::*;

mod book;

pub fn app(module: AppModule, request_timeout: Duration) -> Router {
    with_layers(Router::new().route_book(), request_timeout).with_state(module)
}

fn with_layers(router: Router<AppModule>, request_timeout: Duration) -> Router<AppModule> {
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
