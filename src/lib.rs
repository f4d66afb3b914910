extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate hex;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate sha2;
extern crate thiserror;
extern crate tokio;

pub mod app;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod handlers;
pub mod impls;
pub mod request;
pub mod response;
pub mod server;
