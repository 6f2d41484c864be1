use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method, Response, StatusCode},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use service::wish::{repository::WishRepository, Wish, WishStore};

use crate::errors::ApiError;
use crate::startup::Backend;

/// Whether `method` is routed at all; anything else is answered with 405
/// before a connection is opened.
pub fn accepts(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST
}

/// Route one request by method. The path is not consulted.
pub async fn dispatch<R: WishRepository>(store: &WishStore<R>, method: &Method, body: &[u8]) -> Response<String> {
    let result = match *method {
        Method::GET => list(store).await,
        Method::POST => upsert(store, body).await,
        _ => Err(ApiError::MethodNotAllowed),
    };
    result.unwrap_or_else(Response::from)
}

async fn list<R: WishRepository>(store: &WishStore<R>) -> Result<Response<String>, ApiError> {
    let wishes = store.list().await.map_err(ApiError::internal)?;
    let json = serde_json::to_string(&wishes).map_err(ApiError::internal)?;
    Ok(json_ok(json))
}

/// Echoes the request body back unchanged once the write went through.
async fn upsert<R: WishRepository>(store: &WishStore<R>, body: &[u8]) -> Result<Response<String>, ApiError> {
    let wish: Wish = serde_json::from_slice(body).map_err(|e| ApiError::internal(format!("invalid wish payload: {e}")))?;
    let id = wish.id;
    let outcome = store.upsert(wish).await.map_err(ApiError::internal)?;
    info!(id, ?outcome, "wish_post_handled");
    let echo = String::from_utf8(body.to_vec()).map_err(ApiError::internal)?;
    Ok(json_ok(echo))
}

fn json_ok(body: String) -> Response<String> {
    let mut resp = Response::new(body);
    *resp.status_mut() = StatusCode::OK;
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

async fn handle(State(backend): State<Backend>, method: Method, body: Bytes) -> Response<String> {
    backend.handle(&method, &body).await
}

/// Router for running the handler outside Lambda: every path and method goes
/// through the same dispatch as a gateway invocation.
pub fn build_router(backend: Backend) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(backend)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
