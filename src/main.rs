//! main.rs

use anyhow::Context;
use smscast::configuration::get_configuration;
use smscast::error::AppResult;
use smscast::startup::Application;
use smscast::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> AppResult<()> {
    let subscriber = get_subscriber("smscast".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Panic if we can't read configuration
    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    application
        .run_until_stopped()
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
