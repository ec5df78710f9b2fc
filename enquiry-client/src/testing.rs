//! In-process fake backend for client tests.

use actix_web::{web, App, HttpServer};
use common::utils::Profile;

use crate::config::ClientConfig;

/// Starts an actix server on an ephemeral port and returns its origin.
pub(crate) fn spawn_fake_api<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind fake api");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

pub(crate) fn fake_api_config(origin: &str) -> ClientConfig {
    ClientConfig {
        profile: Profile::Local,
        api_base_url: format!("{}/api/v1", origin),
        api_origin: None,
    }
}
