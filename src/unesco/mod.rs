// src/unesco/mod.rs
pub mod client;
pub mod models;
pub mod page;
