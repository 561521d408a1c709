use std::sync::Arc;

use labeliq_core::{application::LabelIqService, domain::rate_limit::FixedWindowRateLimiter};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: LabelIqService,
    pub rate_limiter: Arc<FixedWindowRateLimiter>,
}

impl AppState {
    pub fn new(
        args: Arc<Args>,
        service: LabelIqService,
        rate_limiter: FixedWindowRateLimiter,
    ) -> Self {
        Self {
            args,
            service,
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
