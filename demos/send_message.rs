use std::io;

use trbsms::{RouterClient, RouterCredentials};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let router = required_env("TRB_ROUTER")?;
    let username = required_env("TRB_USER")?;
    let password = required_env("TRB_PASSWORD")?;
    let number = required_env("TRB_NUMBER")?;
    let text = std::env::var("TRB_TEXT")
        .unwrap_or_else(|_| "Hello from the trbsms example.".to_owned());

    let credentials = RouterCredentials::new(router, username, password)?;
    let client = RouterClient::new(credentials)?;

    let report = client.send_message(&number, &text).await?;
    println!(
        "sent {} part(s) to {} ({} chars, {} SMS used)",
        report.parts_used, report.normalized_number, report.message_length, report.sms_used
    );

    Ok(())
}
