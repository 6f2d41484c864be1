use dotenvy::dotenv;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::{error, info};
use uuid::Uuid;

use common::utils::logging::init_logging_json;

fn init_logging() {
    // .env only matters for `cargo lambda watch`; deployed functions get real env vars
    dotenv().ok();
    init_logging_json();
    info!(service = "wishes-lambda", event = "logger_init", "tracing subscriber initialized");
}

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let resp = server::invoke(event.method(), event.body().as_ref()).await;
    Ok(resp.map(Body::from))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let service_id = Uuid::new_v4();
    // Panic hook: a panicking invocation still leaves a structured line in CloudWatch
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "wishes-lambda", event = "panic", %service_id, message = %info, "unhandled panic occurred");
    }));

    info!(
        service = "wishes-lambda",
        event = "start",
        %service_id,
        version = env!("CARGO_PKG_VERSION"),
        "lambda runtime starting"
    );
    run(service_fn(function_handler)).await
}
