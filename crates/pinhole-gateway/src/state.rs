use std::sync::Arc;

use pinhole_core::{Redirector, ShortCode, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    base_url: String,
}

impl AppState {
    /// Builds the state around one service that both creates and resolves.
    pub fn new<S>(service: Arc<S>, public_base_url: impl Into<String>) -> Self
    where
        S: Shortener + Redirector,
    {
        Self {
            shortener: service.clone(),
            redirector: service,
            base_url: public_base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    pub fn short_url(&self, code: &ShortCode) -> String {
        code.to_url(&self.base_url)
    }
}
