use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    shown_at: Instant,
    duration: Duration,
}

/// Transient status message ("RUN", "Speed 4", ...) drawn over the grid.
///
/// Purely presentational: it is sampled once per frame and expires by
/// comparing against the clock, never through a scheduled callback.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    notice: Option<Notice>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current message, starting its lifetime now.
    pub fn show(&mut self, message: impl Into<String>, duration: Duration) {
        self.show_at(message, duration, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, duration: Duration, now: Instant) {
        self.notice = Some(Notice {
            text: message.into(),
            shown_at: now,
            duration,
        });
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    /// Active while less than the configured duration has elapsed.
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.notice
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) < n.duration)
    }

    #[cfg(test)]
    pub fn current_message(&self) -> Option<&str> {
        self.current_message_at(Instant::now())
    }

    pub fn current_message_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|_| self.is_active_at(now))
            .map(|n| n.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_shown_initially() {
        let overlay = Overlay::new();
        assert!(!overlay.is_active());
        assert_eq!(overlay.current_message(), None);
    }

    #[test]
    fn visible_for_exactly_its_duration() {
        let mut overlay = Overlay::new();
        let t0 = Instant::now();
        let d = Duration::from_secs(2);
        overlay.show_at("RUN", d, t0);

        assert_eq!(overlay.current_message_at(t0), Some("RUN"));
        assert!(overlay.is_active_at(t0 + d - Duration::from_millis(1)));
        assert!(!overlay.is_active_at(t0 + d));
        assert_eq!(overlay.current_message_at(t0 + d), None);
        assert_eq!(overlay.current_message_at(t0 + d * 3), None);
    }

    #[test]
    fn show_replaces_message_and_restarts_lifetime() {
        let mut overlay = Overlay::new();
        let t0 = Instant::now();
        let d = Duration::from_secs(1);
        overlay.show_at("RUN", d, t0);
        let t1 = t0 + Duration::from_millis(900);
        overlay.show_at("PAUSE", d, t1);

        assert_eq!(overlay.current_message_at(t0 + d), Some("PAUSE"));
        assert!(!overlay.is_active_at(t1 + d));
    }

    #[test]
    fn zero_duration_is_never_active() {
        let mut overlay = Overlay::new();
        let t0 = Instant::now();
        overlay.show_at("CLEAR", Duration::ZERO, t0);
        assert!(!overlay.is_active_at(t0));
    }
}
