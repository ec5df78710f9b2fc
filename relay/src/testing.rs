//! In-process stand-ins for provider APIs.

use actix_web::{web, App, HttpServer};

/// Starts an actix server on an ephemeral port and returns its origin.
pub(crate) fn spawn_fake_provider<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind fake provider");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}
