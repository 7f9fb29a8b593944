//! Landing page motion: the flow modal, hero card parallax and
//! reveal-on-scroll. All of it is per-interaction state; nothing here
//! touches lead data.

pub mod modal;
pub mod parallax;
pub mod reveal;

pub use modal::{Modal, ModalState};
pub use parallax::{CardTransform, ParallaxLoop, ParallaxState};
pub use reveal::RevealObserver;

/// The visitor's `prefers-reduced-motion` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPreference {
    Reduced,
    Full,
}

impl MotionPreference {
    pub fn from_reduced(prefers_reduced: bool) -> Self {
        if prefers_reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }
}

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Grow (positive) or shrink (negative) the bottom edge by a fraction of
    /// the height, like a percentage `rootMargin`.
    pub fn with_bottom_margin(self, fraction: f64) -> Self {
        Self {
            height: (self.height * (1.0 + fraction)).max(0.0),
            ..self
        }
    }
}

/// What the page offers to animate.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub has_modal: bool,
    pub modal_triggers: usize,
    /// `data-depth` attribute of each hero card.
    pub card_depths: Vec<Option<String>>,
    pub reveal_ids: Vec<String>,
}

/// Effects mounted on one page view.
pub struct PageEffects {
    pub motion: MotionPreference,
    pub modal: Option<Modal>,
    pub parallax: Option<ParallaxLoop>,
    pub reveal: RevealObserver<String>,
}

impl PageEffects {
    /// Wire up every effect the layout supports. Needs a tokio runtime when
    /// parallax can start.
    pub fn mount(layout: &PageLayout, motion: MotionPreference) -> Self {
        let modal = (layout.has_modal && layout.modal_triggers > 0).then(|| Modal::new(motion));

        let depths = layout
            .card_depths
            .iter()
            .map(|d| parallax::parse_depth(d.as_deref()))
            .collect();
        let parallax = ParallaxLoop::start(depths, motion);

        let mut reveal = RevealObserver::new();
        for id in &layout.reveal_ids {
            reveal.observe(id.clone());
        }

        Self {
            motion,
            modal,
            parallax,
            reveal,
        }
    }

    /// Classes added to `<body>`.
    pub fn body_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![match self.motion {
            MotionPreference::Reduced => "reduced-motion",
            MotionPreference::Full => "has-motion",
        }];
        if self.parallax.is_some() {
            classes.push("has-parallax");
        }
        classes
    }

    /// Page unload: stop the animation loop.
    pub fn teardown(&mut self) {
        if let Some(mut parallax) = self.parallax.take() {
            parallax.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout {
            has_modal: true,
            modal_triggers: 2,
            card_depths: vec![Some("1.4".into()), None],
            reveal_ids: vec!["about".into(), "flow".into()],
        }
    }

    #[tokio::test]
    async fn full_motion_mounts_everything() {
        let mut effects = PageEffects::mount(&layout(), MotionPreference::Full);
        assert!(effects.modal.is_some());
        assert_eq!(effects.body_classes(), ["has-motion", "has-parallax"]);
        assert_eq!(effects.reveal.watching(), 2);

        effects.teardown();
        assert!(effects.parallax.is_none());
    }

    #[tokio::test]
    async fn reduced_motion_skips_parallax() {
        let effects = PageEffects::mount(&layout(), MotionPreference::from_reduced(true));
        assert!(effects.parallax.is_none());
        assert_eq!(effects.body_classes(), ["reduced-motion"]);
    }

    #[test]
    fn modal_needs_a_trigger() {
        let layout = PageLayout {
            has_modal: true,
            modal_triggers: 0,
            ..Default::default()
        };
        let effects = PageEffects::mount(&layout, MotionPreference::Reduced);
        assert!(effects.modal.is_none());
    }

    #[test]
    fn bottom_margin_shrinks_height() {
        let rect = Rect::new(0.0, 0.0, 100.0, 1000.0).with_bottom_margin(-0.1);
        assert_eq!(rect.bottom(), 900.0);
    }
}
