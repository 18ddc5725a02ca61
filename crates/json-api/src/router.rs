//! App Router

use salvo::Router;

use crate::{agents, auth, users};

/// Routes mounted under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("agents")
                .get(agents::index::handler)
                .post(agents::create::handler)
                .push(Router::with_path("status/summary").get(agents::summary::handler))
                .push(
                    Router::with_path("{id}")
                        .get(agents::get::handler)
                        .put(agents::update::handler)
                        .delete(agents::delete::handler)
                        .push(Router::with_path("status").patch(agents::status::handler)),
                ),
        )
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(
            Router::with_path("users")
                .hoop(auth::middleware::handler)
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}
