pub mod config;
pub mod data;
pub mod db;
pub mod errors;
pub mod render;
pub mod routes;
