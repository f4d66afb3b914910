pub mod answer;
pub mod generation;
pub mod health;
pub mod results;
pub mod survey;
pub mod user;
