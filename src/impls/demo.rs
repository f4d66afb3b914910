pub mod api;
pub mod fixtures;
pub mod generator;
pub mod store;

pub use api::DemoSurveyApi;
pub use generator::DemoSurveyGenerator;
pub use store::DemoStore;

pub const DEMO_HEALTH_STATUS: &str = "HEALTHY (Demo Mode)";
