use clap::Parser;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tracing::info;
use zoomies_core::{DonationDefaults, MIN_DONATION};
use zoomies_service::{build_router, ServiceConfig, ServiceState};

#[derive(Debug, Parser)]
#[command(name = "zoomiesd", version, about = "Zoomies donation quote service")]
struct Cli {
    /// REST socket address to bind, e.g. 127.0.0.1:8092
    #[arg(long, default_value = "127.0.0.1:8092", env = "ZOOMIES_LISTEN")]
    listen: SocketAddr,
    /// Donation amount used when the form leaves it blank.
    #[arg(long, default_value = "100", env = "ZOOMIES_DEFAULT_AMOUNT")]
    default_amount: Decimal,
    /// Tip used when the form leaves it blank.
    #[arg(long, default_value = "10", env = "ZOOMIES_DEFAULT_TIP")]
    default_tip: Decimal,
    /// Largest amount or tip accepted by the quote endpoint.
    #[arg(long, default_value = "1000000", env = "ZOOMIES_MAX_AMOUNT")]
    max_amount: Decimal,
}

impl Cli {
    fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        if self.max_amount < Decimal::ONE {
            anyhow::bail!("--max-amount must be at least 1, got {}", self.max_amount);
        }
        if self.default_amount < MIN_DONATION || self.default_amount > self.max_amount {
            anyhow::bail!(
                "--default-amount must be between {MIN_DONATION} and {}, got {}",
                self.max_amount,
                self.default_amount
            );
        }
        if self.default_tip < Decimal::ZERO || self.default_tip > self.max_amount {
            anyhow::bail!(
                "--default-tip must be between 0 and {}, got {}",
                self.max_amount,
                self.default_tip
            );
        }
        Ok(ServiceConfig {
            defaults: DonationDefaults {
                amount: self.default_amount,
                tip: self.default_tip,
            },
            max_amount: self.max_amount,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "zoomies_service=info,tower_http=info,info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.service_config()?;
    info!(
        default_amount = %config.defaults.amount,
        default_tip = %config.defaults.tip,
        max_amount = %config.max_amount,
        "Starting zoomies-service"
    );

    let app = build_router(ServiceState::new(config));
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!("zoomies-service REST listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
