pub mod authentication;
pub mod config;
pub mod db;
pub mod error;
pub mod leaderboard;
pub mod memory;
pub mod model;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod window;
