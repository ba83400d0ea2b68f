//! src/routes/landing/post.rs

use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use crate::sms_client::SmsClient;
use crate::subscriber_store::SubscriberStore;
use crate::utils::see_other;

#[derive(serde::Deserialize)]
pub struct BroadcastFormData {
    pub message: String,
}

/// Broadcast the operator-entered message to every active subscriber.
///
/// The recipient list is recomputed from the live store per request. An empty
/// list is still handed to the gateway; there is no local short-circuit. The
/// outcome, success count or error detail, is surfaced to the operator as a
/// flash message on the landing page.
#[tracing::instrument(
    name = "Broadcasting a message to active subscribers",
    skip(form, store, sms_client)
)]
pub async fn broadcast(
    form: web::Form<BroadcastFormData>,
    store: web::Data<SubscriberStore>,
    sms_client: web::Data<SmsClient>,
) -> HttpResponse {
    let recipients = store.active_subscribers();
    match sms_client
        .send(sms_client.originator(), &recipients, &form.message)
        .await
    {
        Ok(()) => {
            FlashMessage::info(format!("Message sent to {} subscribers.", recipients.len()))
                .send();
        }
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to broadcast message");
            FlashMessage::error(format!("Could not send message: {}", e)).send();
        }
    }
    see_other("/")
}
