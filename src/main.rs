use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_rec_api::{
    api::{create_router, AppState},
    config::Config,
    services::{GenreWeight, JsonFileCatalog, RecommendOptions, RecommendationService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_rec_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(JsonFileCatalog::new(&config.catalog_path));
    let genre_weight = GenreWeight::new(config.genre_weight)?;
    let defaults = RecommendOptions::new(config.default_num_rec)
        .with_stop_words(config.stop_words.clone());

    let state = AppState::new(RecommendationService::new(catalog, genre_weight), defaults);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        catalog = %config.catalog_path,
        genre_weight = config.genre_weight,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
