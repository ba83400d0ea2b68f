//! src/startup.rs

use std::net::TcpListener;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{web, web::Data, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use tracing_actix_web::TracingLogger;

use crate::configuration::{Settings, SubscriberStoreSettings};
use crate::error::AppResult;
use crate::routes::{broadcast, health_check, inbound_sms, inbound_sms_noop, landing};
use crate::sms_client::SmsClient;
use crate::subscriber_store::SubscriberStore;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> AppResult<Self> {
        let store = load_subscriber_store(&configuration.subscriber_store);
        let sms_client = configuration.sms_client.client();

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr().context("Failed to read the bound address")?.port();
        let server = run(
            listener,
            store,
            sms_client,
            configuration.application.hmac_secret,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Load the subscriber list from its file. A missing or malformed file is not
/// fatal: the failure is logged and the server starts with an empty store.
fn load_subscriber_store(settings: &SubscriberStoreSettings) -> SubscriberStore {
    match SubscriberStore::load(&settings.file) {
        Ok(store) => {
            tracing::info!(
                file = %settings.file,
                active_subscribers = store.active_subscriber_count(),
                "Loaded subscriber list"
            );
            store
        }
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                file = %settings.file,
                "Failed to load subscriber list, starting with an empty store"
            );
            SubscriberStore::empty(&settings.file)
        }
    }
}

pub fn run(
    listener: TcpListener,
    store: SubscriberStore,
    sms_client: SmsClient,
    hmac_secret: Secret<String>,
) -> AppResult<Server> {
    let store = Data::new(store);
    let sms_client = Data::new(sms_client);
    // Flash messages carry the broadcast outcome across the POST -> redirect
    // -> GET cycle of the landing page.
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(TracingLogger::default())
            .route("/", web::get().to(landing))
            .route("/", web::post().to(broadcast))
            .service(
                web::resource("/webhook")
                    .route(web::post().to(inbound_sms))
                    // the gateway gets a silent 200 for any other method
                    .route(web::route().to(inbound_sms_noop)),
            )
            .route("/health_check", web::get().to(health_check))
            .app_data(store.clone())
            .app_data(sms_client.clone())
    })
    .listen(listener)
    .context("Failed to listen on the provided socket")?
    .run();
    Ok(server)
}
