use std::io;

use sinch_conversations::{
    AuthMethod, ConversationClient, Credentials, Region, SendOptions, SendSms, SenderId,
};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let region = std::env::var("SINCH_REGION").unwrap_or_else(|_| "us".to_owned());
    let auth_method = std::env::var("SINCH_AUTH_METHOD").unwrap_or_default();
    let credentials = Credentials::new(
        required("SINCH_KEY_ID")?,
        required("SINCH_KEY_SECRET")?,
        required("SINCH_PROJECT_ID")?,
        required("SINCH_APP_ID")?,
    )?
    .with_region(Region::from_code(&region))
    .with_auth_method(AuthMethod::from_code(&auth_method));

    let phone = required("SINCH_PHONE")?;
    let country = std::env::var("SINCH_COUNTRY").ok();
    let message = std::env::var("SINCH_MESSAGE")
        .unwrap_or_else(|_| "Hello from the sinch-conversations demo.".to_owned());
    let options = SendOptions {
        sms_sender: std::env::var("SINCH_SMS_SENDER")
            .ok()
            .map(SenderId::new)
            .transpose()?,
        ..SendOptions::default()
    };

    let client = ConversationClient::new(credentials);
    let request = SendSms::parse(&phone, country.as_deref(), message, options)?;

    let response = client.send_sms(request).await?;
    println!(
        "to: {}, status: {}, message_id: {}, accepted_time: {}",
        response.to,
        response.result.status.as_str(),
        response.result.message_id,
        response.result.accepted_time
    );

    Ok(())
}
