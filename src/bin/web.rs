#![cfg(not(tarpaulin_include))]

use mailsift::app;

/// Main entry point for the web application
///
/// Binds on every interface; the port comes from the `PORT` environment
/// variable and defaults to 5000.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    app::run(&format!("0.0.0.0:{port}")).await
}
