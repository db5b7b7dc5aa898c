use std::sync::Arc;

use crate::app::error::Result;
use crate::client::{HttpTransport, SubmissionClient, Transport};
use crate::config::Config;

pub struct AppContext {
    pub config: Config,
    pub client: SubmissionClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn Transport + Send + Sync> = Arc::new(HttpTransport::new(&config.api)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self {
            config,
            client: SubmissionClient::new(transport),
        }
    }
}
