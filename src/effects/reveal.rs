use std::collections::HashSet;
use std::hash::Hash;

use super::Rect;

/// Fraction of an element that must be inside the root before it reveals.
pub const THRESHOLD: f64 = 0.2;
/// Root margin on the bottom edge, as a fraction of the root height.
pub const BOTTOM_MARGIN: f64 = -0.10;

/// Reveal-on-scroll for `.reveal` elements. Each element is revealed at
/// most once and is no longer watched afterwards.
#[derive(Debug, Clone)]
pub struct RevealObserver<K> {
    watching: HashSet<K>,
    visible: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealObserver<K> {
    pub fn new() -> Self {
        Self {
            watching: HashSet::new(),
            visible: HashSet::new(),
        }
    }

    pub fn observe(&mut self, key: K) {
        if !self.visible.contains(&key) {
            self.watching.insert(key);
        }
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.visible.contains(key)
    }

    pub fn watching(&self) -> usize {
        self.watching.len()
    }

    /// Re-evaluate element positions against the viewport. Returns the keys
    /// revealed by this call.
    pub fn on_scroll<'a, I>(&mut self, viewport: Rect, elements: I) -> Vec<K>
    where
        I: IntoIterator<Item = (&'a K, Rect)>,
        K: 'a,
    {
        let root = viewport.with_bottom_margin(BOTTOM_MARGIN);
        let mut revealed = Vec::new();

        for (key, rect) in elements {
            if !self.watching.contains(key) {
                continue;
            }
            if intersection_ratio(rect, root) >= THRESHOLD {
                self.watching.remove(key);
                self.visible.insert(key.clone());
                revealed.push(key.clone());
            }
        }

        revealed
    }
}

impl<K: Eq + Hash + Clone> Default for RevealObserver<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Share of `target`'s area that lies inside `root`.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let left = target.left.max(root.left);
    let right = target.right().min(root.right());
    let top = target.top.max(root.top);
    let bottom = target.bottom().min(root.bottom());

    if right < left || bottom < top {
        return 0.0;
    }

    let area = target.width * target.height;
    if area <= 0.0 {
        return 1.0;
    }
    ((right - left) * (bottom - top) / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn ratio_accounts_for_partial_overlap() {
        let target = Rect::new(0.0, 900.0, 100.0, 200.0);
        assert!((intersection_ratio(target, viewport()) - 0.5).abs() < 1e-9);
        let outside = Rect::new(0.0, 1200.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(outside, viewport()), 0.0);
    }

    #[test]
    fn bottom_margin_delays_reveal() {
        let mut observer = RevealObserver::new();
        let key = "hero".to_string();
        observer.observe(key.clone());

        // 30% inside the raw viewport, but the root ends at y=900.
        let rect = Rect::new(0.0, 940.0, 100.0, 200.0);
        assert!(observer.on_scroll(viewport(), [(&key, rect)]).is_empty());

        // 25% inside the shrunken root.
        let rect = Rect::new(0.0, 850.0, 100.0, 200.0);
        assert_eq!(observer.on_scroll(viewport(), [(&key, rect)]), vec![key.clone()]);
        assert!(observer.is_visible(&key));
    }

    #[test]
    fn reveals_once_and_never_hides() {
        let mut observer = RevealObserver::new();
        let key = 7u32;
        observer.observe(key);

        let inside = Rect::new(0.0, 100.0, 100.0, 100.0);
        let outside = Rect::new(0.0, 5000.0, 100.0, 100.0);

        assert_eq!(observer.on_scroll(viewport(), [(&key, inside)]), vec![7]);
        assert!(observer.on_scroll(viewport(), [(&key, outside)]).is_empty());
        assert!(observer.on_scroll(viewport(), [(&key, inside)]).is_empty());
        assert!(observer.is_visible(&key));
        assert_eq!(observer.watching(), 0);

        observer.observe(key);
        assert_eq!(observer.watching(), 0);
    }
}
