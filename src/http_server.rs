use clap::Parser;
use game_vote_backend::{
    api::CatalogApi, http, util::settings::Settings, voting::VotingManager, Status, Tracing,
};
use std::{env, sync::Arc};
use tracing::{info, warn};
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// JSON file with the catalog service and voting calendar settings.
    #[clap(long, default_value = "settings.json")]
    settings: String,

    /// Port number to use for listening to HTTP requests.
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// Google Cloud project that receives traces when running in prod.
    #[clap(long, default_value = "game-vote")]
    project_id: String,

    #[clap(long)]
    prod_tracing: bool,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    match opts.prod_tracing {
        false => Tracing::setup("http_logs")?,
        true => Tracing::setup_prod(&opts.project_id, "http_logs")?,
    }

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let settings = Settings::from_file(&opts.settings)?;
    let catalog = Arc::new(CatalogApi::from_settings(&settings));
    let manager = VotingManager::from_settings(catalog, &settings)?;

    match manager.is_connection_working().await {
        Ok(true) => info!("catalog service at {} is reachable", settings.catalog_url),
        Ok(false) => warn!("catalog service rejected the configured api key"),
        Err(status) => warn!("catalog service is not reachable: {status}"),
    }

    info!("http server started on port {port}");

    warp::serve(
        http::routes::routes(Arc::new(manager)).with(
            warp::cors()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["Content-Type"])
                .allow_any_origin(),
        ),
    )
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
