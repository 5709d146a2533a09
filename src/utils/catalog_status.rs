use clap::Parser;
use game_vote_backend::{
    api::CatalogApi, documents::Snapshot, util::settings::Settings, voting::VotingManager,
    Status, Tracing,
};
use std::sync::Arc;

/// Checks the catalog service and prints the current catalog.
#[derive(Parser)]
struct Opts {
    /// JSON file with the catalog service and voting calendar settings.
    #[clap(long, default_value = "settings.json")]
    settings: String,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    Tracing::setup("catalog_status")?;

    let opts: Opts = Opts::parse();
    let settings = Settings::from_file(&opts.settings)?;
    let manager = VotingManager::from_settings(
        Arc::new(CatalogApi::from_settings(&settings)),
        &settings,
    )?;

    if !manager.is_connection_working().await? {
        return Err(Status::invalid_argument(
            "catalog service rejected the configured api key",
        ));
    }

    let (owned, wanted) = Snapshot::new(manager.get_all_games().await?).split();

    println!("owned ({}):", owned.len());
    for game in &owned {
        println!("  [{}] {}", game.id, game.title);
    }

    println!("wanted ({}):", wanted.len());
    for game in &wanted {
        println!("  [{}] {} [votes: {}]", game.id, game.title, game.votes);
    }

    println!(
        "entries allowed right now ({}): {}",
        settings.time_zone,
        manager.are_entries_allowed_right_now()
    );

    Ok(())
}
