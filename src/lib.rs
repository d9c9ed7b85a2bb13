//! Venue, artist and show listings over Postgres.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;
