use std::io;

use sinch_conversations::{AuthMethod, ConversationClient, Credentials, Region};
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

    let client = ConversationClient::new(credentials);
    let app = client.check_credentials().await?;
    println!(
        "credentials ok: app {} ({})",
        app.id.as_deref().unwrap_or("?"),
        app.display_name.as_deref().unwrap_or("unnamed")
    );

    Ok(())
}
