// src/lib.rs

//! Rental Catalog Library

pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod search;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod source;
pub mod utils;
