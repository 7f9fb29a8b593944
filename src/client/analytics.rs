use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub action: &'static str,
    pub category: &'static str,
    pub label: &'static str,
}

impl AnalyticsEvent {
    pub fn submission(success: bool) -> Self {
        Self {
            action: "form_submission",
            category: "consultation",
            label: if success { "success" } else { "error" },
        }
    }
}

/// Optional page analytics callback.
pub type AnalyticsHook = Arc<dyn Fn(&AnalyticsEvent) + Send + Sync>;
