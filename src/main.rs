use std::{str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleet_console::api::{default_routes, MockAuthenticator, RouteTable, Router, SessionStore};
use fleet_console::system::{ApiClient, Clock, Config, FileStore, SystemClock};

const HELP: &str = "Commands: login <user> <password> | logout | go <path> | whoami | routes | quit";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::from_str(&config.log_level).context("Invalid RUST_LOG filter")?)
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Log level: {}", config.log_level);
    info!("API url: {}", config.api_url);
    info!("Storage: {}", config.storage_path.display());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let api = Arc::new(ApiClient::new(&config.api_url)?);
    let authenticator = Arc::new(MockAuthenticator::new(clock.clone())?);
    let session = Arc::new(SessionStore::new(
        Arc::new(FileStore::new(&config.storage_path)),
        api,
        authenticator,
        clock,
    ));
    let router = Router::new(RouteTable::new(&default_routes())?, session.clone());

    let landed = router.push("/")?;
    println!("Fleet console ready at {}", landed.full_path);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["login", username, password] => match session.login(username, password).await {
                Ok(_) => {
                    // Forward to the page that sent us to the login screen, if any.
                    let target = router
                        .current()
                        .and_then(|route| route.query.get("redirect").cloned())
                        .unwrap_or_else(|| "/".to_string());
                    match router.push(&target) {
                        Ok(route) => println!("Welcome {}, now at {}", session.username(), route.full_path),
                        Err(e) => println!("{}", e),
                    }
                }
                Err(e) => println!("{}", e),
            },
            ["logout"] => {
                session.logout();
                match router.push("/login") {
                    Ok(route) => println!("Logged out, now at {}", route.full_path),
                    Err(e) => println!("{}", e),
                }
            }
            ["go", path] => match router.push(path) {
                Ok(route) => println!(
                    "Now at {} ({})",
                    route.full_path,
                    route.name().unwrap_or("unnamed")
                ),
                Err(e) => println!("{}", e),
            },
            ["whoami"] => match session.user() {
                Some(user) => println!("{} (id {}, role {})", user.username, user.id, user.role),
                None => println!("Not logged in"),
            },
            ["routes"] => {
                for route in router.table().descriptors() {
                    let access = match (route.requires_admin, route.requires_auth) {
                        (true, _) => "admin",
                        (false, true) => "staff",
                        (false, false) => "public",
                    };
                    println!("{:<20} {:<12} {}", route.path, route.name.as_deref().unwrap_or("-"), access);
                }
            }
            ["quit"] | ["exit"] => break,
            _ => println!("{}", HELP),
        }
    }
    Ok(())
}
