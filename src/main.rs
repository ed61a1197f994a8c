use std::net::TcpListener;

use anyhow::Context;

use booking_notify::app;
use booking_notify::client::EmailClient;
use booking_notify::settings::Settings;
use booking_notify::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("info")?;

    let settings = Settings::load().expect("Failed to load settings");

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, email_client, settings.notify.to_config())?
        .await
        .context("Failed to run app")
}
