use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use gmbio_avatar_store::{router, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gmbio-avatar-store")]
#[command(about = "gm.bio avatar side-store")]
struct Args {
    /// Listen address
    #[arg(long, env = "AVATAR_STORE_BIND", default_value = "0.0.0.0:8787")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gmbio_avatar_store=debug,gmbio_sdk=debug".into()),
        )
        .init();

    let args = Args::parse();
    let app = router(Arc::new(AppState::new()));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Avatar side-store listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
