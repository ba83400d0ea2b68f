//! src/routes/webhook.rs

use actix_web::{web, HttpResponse};

use crate::domain::{PhoneNumber, SubscriptionStatus};
use crate::error::AppResult;
use crate::sms_client::SmsClient;
use crate::subscriber_store::SubscriberStore;

const SUBSCRIBED_CONFIRMATION: &str =
    "You've been subscribed! Reply \"STOP\" to stop receiving these messages.";
const UNSUBSCRIBED_CONFIRMATION: &str =
    "You've been unsubscribed! Reply \"SUBSCRIBE\" if you changed your mind!";
const HOW_TO_SUBSCRIBE: &str = "SMS \"SUBSCRIBE\" to this number to subscribe to these messages.";

/// The form the gateway POSTs when relaying an inbound SMS. It carries more
/// fields (message_id, createdDatetime, ...); we only read these three.
#[derive(serde::Deserialize)]
pub struct InboundSmsForm {
    /// The number the SMS was sent to, without its `+` prefix.
    pub receiver: String,
    /// The number the SMS was sent from, without its `+` prefix.
    pub originator: String,
    /// The text of the SMS.
    pub payload: String,
}

/// What an inbound SMS asks us to do, by ordered substring match.
#[derive(Debug, PartialEq, Eq)]
enum SubscriptionCommand {
    Subscribe,
    Stop,
    Other,
}

fn classify_payload(payload: &str) -> SubscriptionCommand {
    // First match wins; a payload containing both keywords subscribes.
    if payload.contains("SUBSCRIBE") {
        SubscriptionCommand::Subscribe
    } else if payload.contains("STOP") {
        SubscriptionCommand::Stop
    } else {
        SubscriptionCommand::Other
    }
}

/// Handle an inbound SMS relayed by the gateway.
///
/// The gateway expects a fast acknowledgment no matter what happens
/// downstream, so store persistence failures and send failures are logged and
/// swallowed; the response is always an empty 200.
#[tracing::instrument(
    name = "Handling an inbound SMS",
    skip(form, store, sms_client),
    fields(payload = %form.payload)
)]
pub async fn inbound_sms(
    form: web::Form<InboundSmsForm>,
    store: web::Data<SubscriberStore>,
    sms_client: web::Data<SmsClient>,
) -> AppResult<HttpResponse> {
    let subscriber = PhoneNumber::from_msisdn(&form.originator)?;
    let receiving_number = PhoneNumber::from_msisdn(&form.receiver)?;

    match classify_payload(&form.payload) {
        SubscriptionCommand::Subscribe => {
            if let Err(e) = store.upsert(subscriber.clone(), SubscriptionStatus::Subscribed) {
                tracing::error!(error.cause_chain = ?e, "Failed to persist subscription");
            }
            send_and_log(
                &sms_client,
                sms_client.originator(),
                &subscriber,
                SUBSCRIBED_CONFIRMATION,
            )
            .await;
        }
        SubscriptionCommand::Stop => {
            if let Err(e) = store.upsert(subscriber.clone(), SubscriptionStatus::Unsubscribed) {
                tracing::error!(error.cause_chain = ?e, "Failed to persist unsubscription");
            }
            send_and_log(
                &sms_client,
                sms_client.originator(),
                &subscriber,
                UNSUBSCRIBED_CONFIRMATION,
            )
            .await;
        }
        SubscriptionCommand::Other => {
            // Instructions are sent from the number that received the SMS,
            // not the default originator.
            send_and_log(
                &sms_client,
                receiving_number.as_ref(),
                &subscriber,
                HOW_TO_SUBSCRIBE,
            )
            .await;
        }
    }
    Ok(HttpResponse::Ok().finish())
}

/// Non-POST requests to the webhook are acknowledged without doing anything.
pub async fn inbound_sms_noop() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn send_and_log(
    sms_client: &SmsClient,
    originator: &str,
    recipient: &PhoneNumber,
    body: &str,
) {
    if let Err(e) = sms_client
        .send(originator, std::slice::from_ref(recipient), body)
        .await
    {
        tracing::error!(error.cause_chain = ?e, "Failed to send reply SMS");
    }
}
