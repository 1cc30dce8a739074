//! Operator CLI: log in against the backend, persist the session, and print
//! profile or appointment data as a table.
//!
//! Usage: carelink_cli <email> <password> [profile|appointments|emergency]

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing_subscriber::{fmt, EnvFilter};

use carelink::cli::print_list;
use carelink::config::GatewayConfig;
use carelink::gateway::ApiGateway;
use carelink::services::{AppointmentService, AuthService, EmergencyService, UserService};
use carelink::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: carelink_cli <email> <password> [profile|appointments|emergency]");
    }
    let (email, password) = (&args[0], &args[1]);
    let command = args.get(2).map(String::as_str).unwrap_or("appointments");

    let cfg = GatewayConfig::from_env();
    let store = Arc::new(SessionStore::open(&cfg.state_dir));
    let gateway = ApiGateway::new(&cfg.api_origin, store.clone())?;

    let auth = AuthService::new(gateway.clone(), store.clone());
    let outcome = auth.login(email, password).await?;
    println!(
        "logged in as {} ({}), dashboard: {}",
        outcome.user.name,
        outcome.user.role.tag(),
        outcome.dashboard
    );

    match command {
        "profile" => {
            let profile = UserService::new(gateway).profile().await?;
            if !print_list(std::slice::from_ref(&profile)) {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            }
        }
        "appointments" => {
            let items = AppointmentService::new(gateway).list(None, None).await?;
            if !print_list(&items) {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        "emergency" => {
            let items = EmergencyService::new(gateway).resources().await?;
            if !print_list(&items) {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        other => bail!("unknown command '{}'", other),
    }
    Ok(())
}
