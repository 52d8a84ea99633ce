use std::convert::Infallible;

use chrono::Local;
use warp::{http::StatusCode, reply::Json, Rejection, Reply};

use crate::{
    authentication::RequesterIdentity, error::RankingError, ranking::RankingService,
    window::WindowKind,
};

pub async fn leaderboard(
    kind: String,
    _requester: RequesterIdentity,
    service: RankingService,
) -> Result<Json, Rejection> {
    let kind: WindowKind = kind.parse().map_err(warp::reject::custom)?;
    let entries = service
        .leaderboard(kind, &Local::now())
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&entries))
}

pub async fn position(
    kind: String,
    requester: RequesterIdentity,
    service: RankingService,
) -> Result<Json, Rejection> {
    let kind: WindowKind = kind.parse().map_err(warp::reject::custom)?;
    let position = service
        .position(kind, &requester.0, &Local::now())
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&position))
}

pub async fn health() -> Result<&'static str, Infallible> {
    Ok("OK")
}

/// Turns `RankingError` rejections into JSON error replies. Anything else is
/// left to warp's default handling.
pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Rejection> {
    let Some(error) = rejection.find::<RankingError>() else {
        return Err(rejection);
    };

    let status = error.status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("{}", error);
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&error.body()),
        status,
    ))
}
