pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod report;
