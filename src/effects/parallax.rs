use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{MotionPreference, Rect};

/// Per-frame smoothing factor toward the pointer target.
pub const EASING: f64 = 0.08;
/// Roughly one display frame.
pub const FRAME: Duration = Duration::from_millis(16);

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Pointer-driven tilt, in container-relative units centred on zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParallaxState {
    pub target_x: f64,
    pub target_y: f64,
    pub current_x: f64,
    pub current_y: f64,
}

impl ParallaxState {
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, bounds: Rect) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let x = (client_x - bounds.left) / bounds.width - 0.5;
        let y = (client_y - bounds.top) / bounds.height - 0.5;
        self.target_x = x.clamp(-0.5, 0.5);
        self.target_y = y.clamp(-0.5, 0.5);
    }

    pub fn on_pointer_leave(&mut self) {
        self.target_x = 0.0;
        self.target_y = 0.0;
    }

    /// Advance one animation frame.
    pub fn step(&mut self) {
        self.current_x = lerp(self.current_x, self.target_x, EASING);
        self.current_y = lerp(self.current_y, self.target_y, EASING);
    }

    pub fn transform(&self, depth: f64) -> CardTransform {
        CardTransform {
            translate_x: self.current_x * 10.0 * depth,
            translate_y: self.current_y * 10.0 * depth,
            rotate_x: self.current_y * -2.2 * depth,
            rotate_y: self.current_x * 2.5 * depth,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl CardTransform {
    /// Custom properties consumed by the card stylesheet.
    pub fn css_vars(&self) -> [(&'static str, String); 4] {
        [
            ("--tx", format!("{}px", self.translate_x)),
            ("--ty", format!("{}px", self.translate_y)),
            ("--rx", format!("{}deg", self.rotate_x)),
            ("--ry", format!("{}deg", self.rotate_y)),
        ]
    }
}

/// Card depth from its `data-depth` attribute; 1 when absent or unparsable.
pub fn parse_depth(attr: Option<&str>) -> f64 {
    attr.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .unwrap_or(1.0)
}

/// The running animation loop. Stops on [`ParallaxLoop::cancel`] or drop.
pub struct ParallaxLoop {
    state: Arc<Mutex<ParallaxState>>,
    frames: watch::Receiver<Vec<CardTransform>>,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl ParallaxLoop {
    /// Start animating the given card depths. Returns `None` under reduced
    /// motion or when there are no cards.
    pub fn start(depths: Vec<f64>, motion: MotionPreference) -> Option<Self> {
        if motion == MotionPreference::Reduced || depths.is_empty() {
            return None;
        }

        let state = Arc::new(Mutex::new(ParallaxState::default()));
        let (frame_tx, frames) = watch::channel(vec![CardTransform::default(); depths.len()]);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let loop_state = state.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FRAME);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }

                let snapshot = {
                    let mut state = loop_state
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                    state.step();
                    *state
                };
                let transforms = depths.iter().map(|d| snapshot.transform(*d)).collect();
                if frame_tx.send(transforms).is_err() {
                    break;
                }
            }

            tracing::debug!("Parallax loop stopped");
        });

        Some(Self {
            state,
            frames,
            shutdown,
            handle: Some(handle),
        })
    }

    fn with_state(&self, f: impl FnOnce(&mut ParallaxState)) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state);
    }

    pub fn pointer_move(&self, client_x: f64, client_y: f64, bounds: Rect) {
        self.with_state(|s| s.on_pointer_move(client_x, client_y, bounds));
    }

    pub fn pointer_leave(&self) {
        self.with_state(ParallaxState::on_pointer_leave);
    }

    pub fn state(&self) -> ParallaxState {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Transforms from the most recent frame.
    pub fn latest(&self) -> Vec<CardTransform> {
        self.frames.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for ParallaxLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
