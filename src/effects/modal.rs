use super::MotionPreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    /// Close transition running; still rendered.
    Closing,
}

/// The flow dialog opened by `.modal-trigger` elements.
#[derive(Debug, Clone)]
pub struct Modal {
    state: ModalState,
    motion: MotionPreference,
}

impl Modal {
    pub fn new(motion: MotionPreference) -> Self {
        Self {
            state: ModalState::Closed,
            motion,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    /// Trigger click.
    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    /// Click inside the modal. `close_marker` is true when the clicked
    /// element carries `data-close="true"` (backdrop, close button).
    pub fn on_click(&mut self, close_marker: bool) {
        if close_marker {
            self.request_close();
        }
    }

    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" {
            self.request_close();
        }
    }

    /// `transitionend` bubbled to the modal. Only the content panel's
    /// transition finishes a close.
    pub fn on_transition_end(&mut self, from_content: bool) {
        if from_content && self.state == ModalState::Closing {
            self.state = ModalState::Closed;
        }
    }

    fn request_close(&mut self) {
        if self.state != ModalState::Open {
            return;
        }
        self.state = match self.motion {
            MotionPreference::Reduced => ModalState::Closed,
            MotionPreference::Full => ModalState::Closing,
        };
    }

    pub fn classes(&self) -> &'static [&'static str] {
        match self.state {
            ModalState::Closed => &[],
            ModalState::Open => &["is-open"],
            ModalState::Closing => &["is-open", "is-closing"],
        }
    }

    pub fn aria_hidden(&self) -> bool {
        self.state == ModalState::Closed
    }

    /// Value for `document.body.style.overflow`.
    pub fn body_overflow(&self) -> &'static str {
        if self.state == ModalState::Closed { "" } else { "hidden" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sets_state_and_locks_scroll() {
        let mut modal = Modal::new(MotionPreference::Full);
        assert!(modal.aria_hidden());
        modal.open();
        assert_eq!(modal.classes(), ["is-open"]);
        assert!(!modal.aria_hidden());
        assert_eq!(modal.body_overflow(), "hidden");
    }

    #[test]
    fn animated_close_waits_for_content_transition() {
        let mut modal = Modal::new(MotionPreference::Full);
        modal.open();
        modal.on_key("Escape");
        assert_eq!(modal.state(), ModalState::Closing);
        assert_eq!(modal.classes(), ["is-open", "is-closing"]);

        modal.on_transition_end(false);
        assert_eq!(modal.state(), ModalState::Closing);

        modal.on_transition_end(true);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.aria_hidden());
        assert_eq!(modal.body_overflow(), "");
    }

    #[test]
    fn reduced_motion_closes_immediately() {
        let mut modal = Modal::new(MotionPreference::Reduced);
        modal.open();
        modal.on_click(true);
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn close_requests_ignored_unless_open() {
        let mut modal = Modal::new(MotionPreference::Reduced);
        modal.on_key("Escape");
        modal.on_click(true);
        assert_eq!(modal.state(), ModalState::Closed);

        modal.open();
        modal.on_key("Enter");
        modal.on_click(false);
        assert!(modal.is_open());
    }

    #[test]
    fn reopening_during_close_cancels_it() {
        let mut modal = Modal::new(MotionPreference::Full);
        modal.open();
        modal.on_key("Escape");
        modal.open();
        modal.on_transition_end(true);
        assert!(modal.is_open());
    }
}
