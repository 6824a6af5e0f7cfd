// Example: resolving a public profile page
//
// Reads configuration from the environment (GMBIO_RPC_URL, GMBIO_PROGRAM_ID,
// GMBIO_SIDE_STORE_URL, ...), looks the username up on-chain, attaches the
// side-store avatar and prints the rendered view.
//
//   cargo run --example fetch_profile -- <username>

use gmbio_sdk::{AvatarDisplay, GmBioClient, GmBioConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::args().nth(1).unwrap_or_else(|| "tQDR".to_string());

    let config = GmBioConfig::from_env();
    let client = GmBioClient::from_config(&config)?;

    println!("Fetching @{username} from {}...", config.rpc_url);

    let Some(view) = client.resolve_view(&username).await else {
        println!("Profile not found");
        return Ok(());
    };

    println!("  Username: {}", view.username);
    println!("  Owner:    {} ({})", view.short_address, view.address);
    println!("  Bio:      {}", view.bio);
    match &view.avatar {
        AvatarDisplay::Image(url) => println!("  Avatar:   {url}"),
        AvatarDisplay::Initials(text) => println!("  Avatar:   [{text}]"),
    }
    for link in &view.links {
        println!("  - {:<12} {}", link.label, link.url);
    }
    println!("  Share:    {}", client.share_url(&view.username)?);

    Ok(())
}
