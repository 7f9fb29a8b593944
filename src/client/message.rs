use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const SUCCESS_TEXT: &str =
    "お申し込みありがとうございます。2営業日以内にメールでご連絡いたします。";
pub const NOT_CONFIGURED_TEXT: &str = "フォームの設定が完了していません。しばらくお待ちください。";
pub const SEND_FAILED_TEXT: &str =
    "送信に失敗しました。もう一度お試しいただくか、メールでお問い合わせください。";

/// How long a success message stays fully visible.
pub const SUCCESS_VISIBLE: Duration = Duration::from_millis(5000);
/// Fade-out duration before the message is cleared.
pub const FADE_OUT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Neutral,
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Neutral => "form-message",
            MessageKind::Success => "form-message success",
            MessageKind::Error => "form-message error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub kind: MessageKind,
    pub text: String,
    pub visible: bool,
    pub opacity: f32,
}

impl MessageView {
    fn neutral() -> Self {
        Self {
            kind: MessageKind::Neutral,
            text: String::new(),
            visible: false,
            opacity: 1.0,
        }
    }
}

struct Region {
    view: MessageView,
    /// Bumped on every change so stale fade timers do nothing.
    generation: u64,
}

/// The status line under the form. Clones share state.
#[derive(Clone)]
pub struct StatusRegion {
    inner: Arc<Mutex<Region>>,
}

impl StatusRegion {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Region {
                view: MessageView::neutral(),
                generation: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Region> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn view(&self) -> MessageView {
        self.lock().view.clone()
    }

    pub fn clear(&self) {
        self.replace(MessageView::neutral());
    }

    pub fn show_error(&self, text: &str) {
        self.replace(MessageView {
            kind: MessageKind::Error,
            text: text.to_string(),
            visible: true,
            opacity: 1.0,
        });
    }

    /// Show a success message that fades after [`SUCCESS_VISIBLE`] and is
    /// cleared [`FADE_OUT`] later. Must be called inside a tokio runtime.
    pub fn show_success(&self, text: &str) {
        let generation = self.replace(MessageView {
            kind: MessageKind::Success,
            text: text.to_string(),
            visible: true,
            opacity: 1.0,
        });

        let region = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_VISIBLE).await;
            if !region.update_if(generation, |view| view.opacity = 0.0) {
                return;
            }
            tokio::time::sleep(FADE_OUT).await;
            region.update_if(generation, |view| *view = MessageView::neutral());
        });
    }

    fn replace(&self, view: MessageView) -> u64 {
        let mut region = self.lock();
        region.generation += 1;
        region.view = view;
        region.generation
    }

    fn update_if(&self, generation: u64, f: impl FnOnce(&mut MessageView)) -> bool {
        let mut region = self.lock();
        if region.generation != generation {
            return false;
        }
        f(&mut region.view);
        true
    }
}

impl Default for StatusRegion {
    fn default() -> Self {
        Self::new()
    }
}
