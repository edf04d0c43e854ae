//! Fetch and print a player's showcase.
//!
//! Run with: cargo run --example showcase

use enka_client::Client;

#[tokio::main]
async fn main() -> enka_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new()?;
    let showcase = client.fetch_showcase("901211014").await?;

    println!("Name: {}", showcase.player.nickname.as_deref().unwrap_or("?"));
    println!("Level: {}", showcase.player.level);
    println!("Achievements: {}", showcase.player.achievements);

    for character in &showcase.characters {
        println!("\n==================\n");
        println!("{}", character.name.as_deref().unwrap_or("(run update_assets)"));
        println!("Level: {}", character.level);
        println!("Constellations: {}", character.constellations_unlocked());
        if let Some(weapon) = &character.weapon {
            println!(
                "Weapon: {} (level {}, refinement {})",
                weapon.name.as_deref().unwrap_or("?"),
                weapon.level,
                weapon.refinement,
            );
        }
    }

    client.close().await
}
