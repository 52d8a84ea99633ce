use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("unrecognized leaderboard window: {0}")]
    InvalidWindow(String),

    #[error("user not found")]
    NotFound,

    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error("scoreboard store unavailable: {0}")]
    StoreUnavailable(String),
}

impl RankingError {
    pub fn status(&self) -> StatusCode {
        match self {
            RankingError::InvalidWindow(_) => StatusCode::BAD_REQUEST,
            RankingError::NotFound => StatusCode::NOT_FOUND,
            RankingError::Unauthorized => StatusCode::UNAUTHORIZED,
            RankingError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent back to clients for this error.
    pub fn body(&self) -> ErrorBody {
        match self {
            RankingError::InvalidWindow(raw) => ErrorBody {
                message: String::from("Invalid leaderboard type"),
                error: Some(raw.clone()),
            },
            RankingError::NotFound => ErrorBody {
                message: String::from("User not found"),
                error: None,
            },
            RankingError::Unauthorized => ErrorBody {
                message: String::from("Unauthorized"),
                error: None,
            },
            RankingError::StoreUnavailable(detail) => ErrorBody {
                message: String::from("Server error"),
                error: Some(detail.clone()),
            },
        }
    }
}

impl From<sqlx::Error> for RankingError {
    fn from(error: sqlx::Error) -> Self {
        RankingError::StoreUnavailable(error.to_string())
    }
}

impl warp::reject::Reject for RankingError {}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
