pub mod health;
pub mod models;
pub mod ports;
pub mod services;
pub mod session;
pub mod taking;
