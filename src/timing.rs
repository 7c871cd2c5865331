use std::time::{Duration, Instant};

/// Length of one step-interval tick.
pub const TICK: Duration = Duration::from_millis(10);

/// Smallest step interval. A zero interval has no meaningful frame cadence.
pub const MIN_INTERVAL: u32 = 1;

/// Run/pause flag plus the user-chosen step interval (in ticks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    interval: u32,
    default_interval: u32,
    running: bool,
}

impl SimulationClock {
    /// Paused clock at `default_interval` (clamped to at least 1).
    pub fn new(default_interval: u32) -> Self {
        let default_interval = default_interval.max(MIN_INTERVAL);
        Self {
            interval: default_interval,
            default_interval,
            running: false,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip run/pause and return the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Shift the interval by `delta` ticks, never going below 1.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.interval) + i64::from(delta);
        self.interval = next.clamp(i64::from(MIN_INTERVAL), i64::from(u32::MAX)) as u32;
        self.interval
    }

    pub fn reset(&mut self) {
        self.interval = self.default_interval;
    }
}

/// Which of the two frame cadences is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fixed, responsive rate used while the user edits a paused grid.
    Editing,
    /// Rate derived from the clock's step interval.
    Running { interval: u32 },
}

impl Cadence {
    pub fn frame_duration(self, editing_fps: u32) -> Duration {
        match self {
            Cadence::Editing => Duration::from_secs(1) / editing_fps.max(1),
            Cadence::Running { interval } => TICK * interval.max(MIN_INTERVAL),
        }
    }
}

/// Chooses the frame cadence from the clock and paces the frame loop.
#[derive(Debug, Clone)]
pub struct TimingController {
    editing_fps: u32,
    cadence: Cadence,
    last_frame: Option<Instant>,
    next_frame: Instant,
}

impl TimingController {
    pub fn new(editing_fps: u32, clock: &SimulationClock) -> Self {
        let mut timing = Self {
            editing_fps,
            cadence: Cadence::Editing,
            last_frame: None,
            next_frame: Instant::now(),
        };
        timing.refresh(clock);
        timing
    }

    /// Re-apply whichever cadence the clock's state calls for. A new cadence
    /// reschedules the next frame from the last one produced.
    pub fn refresh(&mut self, clock: &SimulationClock) {
        let cadence = if clock.is_running() {
            Cadence::Running {
                interval: clock.interval(),
            }
        } else {
            Cadence::Editing
        };
        if cadence == self.cadence {
            return;
        }
        log::debug!("Cadence: {cadence:?} ({:?}/frame)", cadence.frame_duration(self.editing_fps));
        self.cadence = cadence;
        if let Some(last) = self.last_frame {
            self.next_frame = last + self.frame_duration();
        }
    }

    #[cfg(test)]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn frame_duration(&self) -> Duration {
        self.cadence.frame_duration(self.editing_fps)
    }

    /// Instant the next frame is due.
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    pub fn frame_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Record that a frame was produced at `now` and schedule the next one.
    pub fn frame_done(&mut self, now: Instant) {
        self.last_frame = Some(now);
        self.next_frame = now + self.frame_duration();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_paused_at_default() {
        let clock = SimulationClock::new(10);
        assert!(!clock.is_running());
        assert_eq!(clock.interval(), 10);
    }

    #[test]
    fn zero_default_is_clamped() {
        assert_eq!(SimulationClock::new(0).interval(), 1);
    }

    #[test]
    fn adjust_never_goes_below_one() {
        let mut clock = SimulationClock::new(5);
        for _ in 0..20 {
            clock.adjust(-1);
            assert!(clock.interval() >= 1);
        }
        assert_eq!(clock.interval(), 1);
        assert_eq!(clock.adjust(i32::MIN), 1);
        assert_eq!(clock.adjust(3), 4);
    }

    #[test]
    fn reset_restores_default() {
        let mut clock = SimulationClock::new(7);
        clock.adjust(12);
        clock.reset();
        assert_eq!(clock.interval(), 7);
    }

    #[test]
    fn editing_cadence_while_paused() {
        let clock = SimulationClock::new(10);
        let timing = TimingController::new(30, &clock);
        assert_eq!(timing.cadence(), Cadence::Editing);
        assert_eq!(timing.frame_duration(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn running_cadence_follows_interval() {
        let mut clock = SimulationClock::new(10);
        let mut timing = TimingController::new(30, &clock);

        clock.toggle_running();
        timing.refresh(&clock);
        assert_eq!(timing.cadence(), Cadence::Running { interval: 10 });
        assert_eq!(timing.frame_duration(), Duration::from_millis(100));

        clock.adjust(-8);
        timing.refresh(&clock);
        assert_eq!(timing.frame_duration(), Duration::from_millis(20));

        clock.toggle_running();
        timing.refresh(&clock);
        assert_eq!(timing.cadence(), Cadence::Editing);
    }

    #[test]
    fn frame_pacing() {
        let clock = SimulationClock::new(10);
        let mut timing = TimingController::new(50, &clock);
        let t0 = Instant::now();
        timing.frame_done(t0);
        assert!(!timing.frame_due(t0));
        assert!(!timing.frame_due(t0 + Duration::from_millis(19)));
        assert!(timing.frame_due(t0 + Duration::from_millis(20)));
        assert_eq!(timing.next_frame(), t0 + Duration::from_millis(20));
    }

    #[test]
    fn pausing_from_a_slow_interval_switches_to_editing_rate() {
        let mut clock = SimulationClock::new(500);
        let mut timing = TimingController::new(30, &clock);
        clock.toggle_running();
        timing.refresh(&clock);
        let t0 = Instant::now();
        timing.frame_done(t0);
        assert!(!timing.frame_due(t0 + Duration::from_secs(1)));

        clock.toggle_running();
        timing.refresh(&clock);
        assert_eq!(timing.next_frame(), t0 + Duration::from_secs(1) / 30);
        assert!(timing.frame_due(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn speeding_up_takes_effect_before_the_old_deadline() {
        let mut clock = SimulationClock::new(100);
        clock.set_running(true);
        let mut timing = TimingController::new(30, &clock);
        let t0 = Instant::now();
        timing.frame_done(t0);
        assert_eq!(timing.next_frame(), t0 + Duration::from_secs(1));

        clock.adjust(-90);
        timing.refresh(&clock);
        assert_eq!(timing.next_frame(), t0 + Duration::from_millis(100));
    }

    #[test]
    fn unchanged_cadence_keeps_the_deadline() {
        let mut clock = SimulationClock::new(10);
        clock.set_running(true);
        let mut timing = TimingController::new(30, &clock);
        let t0 = Instant::now();
        timing.frame_done(t0);
        timing.refresh(&clock);
        assert_eq!(timing.next_frame(), t0 + Duration::from_millis(100));
    }
}
