use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::{authentication::with_identity, leaderboard, ranking::RankingService};

/// Every route the service exposes, with rejection handling attached.
pub fn routes(
    service: RankingService,
    jwt_secret: Arc<String>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let service_cloned = service.clone();
    let leaderboard_route = warp::path!("leaderboard" / String)
        .and(warp::get())
        .and(with_identity(jwt_secret.clone()))
        .and(warp::any().map(move || service_cloned.clone()))
        .and_then(leaderboard::leaderboard);

    let service_cloned = service.clone();
    let position_route = warp::path!("leaderboard" / "position" / String)
        .and(warp::get())
        .and(with_identity(jwt_secret))
        .and(warp::any().map(move || service_cloned.clone()))
        .and_then(leaderboard::position);

    let health_route = warp::path!("health")
        .and(warp::get())
        .and_then(leaderboard::health);

    position_route
        .or(leaderboard_route)
        .or(health_route)
        .recover(leaderboard::handle_rejection)
}
