use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::core::ports::api::{SurveyApi, SurveyGenerator};
use crate::core::session::SessionContext;
use crate::impls::demo::{DemoStore, DemoSurveyApi, DemoSurveyGenerator};
use crate::impls::http::{HttpSurveyApi, HttpSurveyGenerator};
use crate::impls::storage::file::FileStorage;

/// The two backends plus the persisted session, chosen once at startup.
#[derive(Clone)]
pub struct Clients {
    pub api: Arc<dyn SurveyApi>,
    pub generator: Arc<dyn SurveyGenerator>,
    pub session: SessionContext,
    pub demo: bool,
}

impl Clients {
    pub fn from_config(config: &Config) -> Self {
        let (api, generator): (Arc<dyn SurveyApi>, Arc<dyn SurveyGenerator>) = if config.demo_mode {
            info!("demo mode: serving fixtures in process");
            let store = Arc::new(DemoStore::seeded().with_latency(config.demo_latency));
            (
                Arc::new(DemoSurveyApi::new(store)),
                Arc::new(DemoSurveyGenerator::new(config.demo_latency)),
            )
        } else {
            info!("using survey backend at {}", config.api_base_url);
            (
                Arc::new(HttpSurveyApi::new(config.api_base_url.as_str())),
                Arc::new(HttpSurveyGenerator::new(config.llm_api_base_url.as_str()).with_timeout(config.generate_timeout)),
            )
        };
        Self {
            api,
            generator,
            session: SessionContext::new(Arc::new(FileStorage::new(&config.session_file))),
            demo: config.demo_mode,
        }
    }
}
