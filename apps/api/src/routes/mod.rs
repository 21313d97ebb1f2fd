pub mod health;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Largest accepted PDF upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/resume/analyze", post(resume::handle_analyze))
        .route(
            "/resume/upload",
            post(resume::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/resume/match-jd", post(resume::handle_match))
        .route("/resume/rewrite", post(resume::handle_rewrite))
        // Interview API
        .route("/interview/start", post(interview::handle_start))
        .route(
            "/interview/next-question",
            get(interview::handle_next_question),
        )
        .route("/interview/answer", post(interview::handle_answer))
        .route("/interview/end", post(interview::handle_end))
        .route("/session/:id", get(interview::handle_session_status));

    // Built frontend, with index.html for client-side routes
    let router = match static_dir {
        Some(dir) => {
            let index = Path::new(&dir).join("index.html");
            router.fallback_service(ServeDir::new(&dir).not_found_service(ServeFile::new(index)))
        }
        None => router,
    };

    router.with_state(state)
}
