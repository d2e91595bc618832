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

    let credentials = RouterCredentials::new(router, username, password)?;
    let client = RouterClient::new(credentials)?;

    let modems = client.list_modems().await?;
    if modems.is_empty() {
        println!("router reported no modems");
        return Ok(());
    }

    for modem in modems {
        println!(
            "id: {} | name: {} | primary: {} | state: {} | operator: {}",
            modem.id,
            modem.name.as_deref().unwrap_or("-"),
            modem.primary,
            modem.state.as_deref().unwrap_or("-"),
            modem.operator.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
