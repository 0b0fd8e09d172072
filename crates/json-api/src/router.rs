//! App Router

use salvo::Router;

use crate::{cascade, rescue_requests};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("cascade-runs").post(cascade::run::handler))
        .push(
            Router::with_path("rescue-requests")
                .get(rescue_requests::index::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(rescue_requests::get::handler)
                        .push(Router::with_path("accept").post(rescue_requests::accept::handler))
                        .push(Router::with_path("start").post(rescue_requests::start::handler))
                        .push(
                            Router::with_path("complete").post(rescue_requests::complete::handler),
                        )
                        .push(Router::with_path("cancel").post(rescue_requests::cancel::handler)),
                ),
        )
}
