use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::header::ContentType;
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{get, HttpRequest, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::client::EmailClient;
use crate::controller::booking;
use crate::notify::NotifyConfig;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(ContentType::plaintext())
        .body("Method not allowed")
}

/// Paths outside the booking contract: preflight still succeeds, anything
/// else is a 404
async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return preflight().await;
    }
    HttpResponse::NotFound()
        .content_type(ContentType::plaintext())
        .body("Not found")
}

// The form is served from a statically hosted site on another origin, so
// every response class must carry the CORS headers
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    notify: NotifyConfig,
) -> anyhow::Result<Server> {
    // Wrap application data
    let email_client = web::Data::new(email_client);
    let notify = web::Data::new(notify);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors_headers())
            .app_data(email_client.clone())
            .app_data(notify.clone())
            .service(health_check)
            .service(
                web::resource(["/", "/api/booking"])
                    .route(web::post().to(booking::submit))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .route(web::route().to(method_not_allowed)),
            )
            .default_service(web::route().to(fallback))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
