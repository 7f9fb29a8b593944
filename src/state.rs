use std::sync::Arc;

use crate::config::Config;
use crate::email::NotificationSender;
use crate::rate_limit::SubmissionRateLimiter;
use crate::store::RecordStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub notifier: NotificationSender,
    pub submission_limiter: SubmissionRateLimiter,
}
