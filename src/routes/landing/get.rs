//! src/routes/landing/get.rs

use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

use crate::subscriber_store::SubscriberStore;

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    subscriber_count: usize,
    flash_messages: Vec<String>,
}

/// Landing page: live active subscriber count plus the broadcast form.
///
/// The count is recomputed from the store on every request, so webhook-driven
/// changes show up immediately.
pub async fn landing(
    store: web::Data<SubscriberStore>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    let flash_messages: Vec<String> = flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect();
    LandingTemplate {
        subscriber_count: store.active_subscriber_count(),
        flash_messages,
    }
}
