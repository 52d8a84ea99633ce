use std::sync::Arc;

use leaderboard_backend::{config::Config, db::Db, ranking::RankingService, routes::routes};
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_APP_LOG").is_none() {
        std::env::set_var("RUST_APP_LOG", "info");
    }
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
    log::info!("Leaderboard Backend");

    let config = Config::from_env()?;

    let db = Arc::new(Db::new(&config.database_url, config.db_max_connections).await?);
    let service = RankingService::new(db);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(["GET", "HEAD", "OPTIONS"])
        .allow_headers([
            "Host",
            "Accept",
            "Authorization",
            "User-Agent",
            "Content-Type",
            "Access-Control-Request-Method",
            "Access-Control-Request-Headers",
        ])
        .build();

    let routes = routes(service, Arc::new(config.jwt_secret.clone()))
        .with(cors)
        .with(warp::log("leaderboard"));

    let addr = config.socket_addr();
    log::info!("listening on {}", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}
