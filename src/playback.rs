//! Stepping through a [`Sequence`] one frame per interval.
//!
//! [`Playback`] never sleeps or spawns anything. Whoever drives it waits
//! for [`TickHandle::delay`] and then hands the handle back through
//! [`Playback::tick`]; every tick schedules the next one. Stopping bumps an
//! epoch so handles issued earlier are recognised as stale and ignored.

use std::time::Duration;

use tracing::debug;

use crate::engine::{Frame, Sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Completed,
}

/// A scheduled step, valid until playback is stopped, reset or restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    epoch: u64,
    delay: Duration,
}
impl TickHandle {
    /// How long to wait before passing this handle to [`Playback::tick`]
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Advanced one frame, the next step is due after the handle's delay
    Scheduled(TickHandle),
    /// The last frame is showing and stays showing
    Completed,
    /// The handle was invalidated; nothing changed
    Stale,
}

/// What a renderer or progress indicator observes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub current_frame_index: usize,
    pub is_animating: bool,
    pub total_frames: usize,
}
impl PlaybackStatus {
    pub fn progress(&self) -> f64 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.current_frame_index as f64 / self.total_frames as f64
        }
    }
}

#[derive(Debug)]
pub struct Playback {
    sequence: Sequence,
    interval: Duration,
    state: PlaybackState,
    index: usize,
    epoch: u64,
}

impl Playback {
    pub fn new(sequence: Sequence, interval: Duration) -> Self {
        Self {
            sequence,
            interval,
            state: PlaybackState::Idle,
            index: 0,
            epoch: 0,
        }
    }

    /// Starts from the first frame
    ///
    /// Returns `None` without effect if already running or if there is
    /// nothing to play.
    pub fn start(&mut self) -> Option<TickHandle> {
        if self.state == PlaybackState::Running || self.sequence.is_empty() {
            return None;
        }
        self.state = PlaybackState::Running;
        self.index = 0;
        debug!(frames = self.sequence.len(), "playback started");
        Some(self.schedule())
    }

    pub fn tick(&mut self, handle: TickHandle) -> Tick {
        if self.state != PlaybackState::Running || handle.epoch != self.epoch {
            return Tick::Stale;
        }
        if self.index + 1 >= self.sequence.len() {
            self.state = PlaybackState::Completed;
            self.invalidate();
            debug!("playback completed");
            return Tick::Completed;
        }
        self.index += 1;
        Tick::Scheduled(self.schedule())
    }

    /// Halts on the current frame; does nothing when not running
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Idle;
            debug!(frame = self.index, "playback stopped");
        }
        self.invalidate();
    }

    /// Stops and rewinds to the first frame
    pub fn reset(&mut self) {
        self.stop();
        self.state = PlaybackState::Idle;
        self.index = 0;
    }

    /// Swaps in a sequence built for a new config, stopping playback first
    pub fn replace_sequence(&mut self, sequence: Sequence, interval: Duration) {
        self.reset();
        self.sequence = sequence;
        self.interval = interval;
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            current_frame_index: self.index,
            is_animating: self.state == PlaybackState::Running,
            total_frames: self.sequence.len(),
        }
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&Frame> {
        self.sequence.get(self.index)
    }

    #[inline]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn schedule(&mut self) -> TickHandle {
        self.invalidate();
        TickHandle {
            epoch: self.epoch,
            delay: self.interval,
        }
    }

    fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, Engine};

    const INTERVAL: Duration = Duration::from_millis(100);

    fn playback(generation_count: usize) -> Playback {
        let config = Config {
            width: 40,
            height: 24,
            generation_count,
            ..Config::default()
        };
        let sequence = Engine::new(config).unwrap().generate_states();
        Playback::new(sequence, INTERVAL)
    }

    /// Drives ticks to completion, collecting the frame index after each step
    fn run(playback: &mut Playback, mut handle: TickHandle) -> Vec<usize> {
        let mut seen = vec![playback.status().current_frame_index];
        loop {
            match playback.tick(handle) {
                Tick::Scheduled(next) => {
                    seen.push(playback.status().current_frame_index);
                    handle = next;
                }
                Tick::Completed => return seen,
                Tick::Stale => panic!("live handle reported stale"),
            }
        }
    }

    #[test]
    fn plays_every_frame_then_completes() {
        let mut playback = playback(4);
        let handle = playback.start().unwrap();

        assert_eq!(handle.delay(), INTERVAL);
        assert_eq!(run(&mut playback, handle), vec![0, 1, 2, 3, 4]);
        assert_eq!(playback.state(), PlaybackState::Completed);

        let status = playback.status();
        assert!(!status.is_animating);
        assert_eq!(status.current_frame_index, 4);
        assert_eq!(
            playback.current_frame().map(|f| &f.grid),
            playback.sequence().last().map(|f| &f.grid)
        );
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut once = playback(3);
        let handle = once.start().unwrap();
        let expected = run(&mut once, handle);

        let mut twice = playback(3);
        let handle = twice.start().unwrap();
        assert!(twice.start().is_none());
        assert_eq!(run(&mut twice, handle), expected);
    }

    #[test]
    fn stop_invalidates_pending_tick() {
        let mut playback = playback(5);
        let handle = playback.start().unwrap();
        let Tick::Scheduled(handle) = playback.tick(handle) else {
            panic!("expected another step");
        };
        playback.stop();
        let before = playback.status();

        // the timer fires after stop anyway
        assert_eq!(playback.tick(handle), Tick::Stale);
        assert_eq!(playback.status(), before);
        assert_eq!(before.current_frame_index, 1);
        assert!(!before.is_animating);
    }

    #[test]
    fn stop_when_idle_is_safe() {
        let mut playback = playback(2);
        playback.stop();
        playback.stop();

        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.start().is_some());
    }

    #[test]
    fn old_handle_is_stale_after_restart() {
        let mut playback = playback(3);
        let first = playback.start().unwrap();
        playback.stop();
        let second = playback.start().unwrap();

        assert_eq!(playback.tick(first), Tick::Stale);
        assert!(matches!(playback.tick(second), Tick::Scheduled(_)));
    }

    #[test]
    fn completed_playback_can_restart() {
        let mut playback = playback(1);
        let handle = playback.start().unwrap();
        run(&mut playback, handle);

        let handle = playback.start().unwrap();
        assert_eq!(playback.status().current_frame_index, 0);
        assert_eq!(run(&mut playback, handle), vec![0, 1]);
    }

    #[test]
    fn reset_rewinds() {
        let mut playback = playback(3);
        let handle = playback.start().unwrap();
        let _ = playback.tick(handle);
        playback.reset();

        let status = playback.status();
        assert_eq!(status.current_frame_index, 0);
        assert!(!status.is_animating);
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn replacing_sequence_stops_playback() {
        let mut playback = playback(3);
        let handle = playback.start().unwrap();
        playback.replace_sequence(Sequence::default(), INTERVAL);

        assert_eq!(playback.tick(handle), Tick::Stale);
        assert_eq!(playback.status().total_frames, 0);
        assert!(playback.start().is_none());
    }

    #[test]
    fn progress_is_index_over_total() {
        let mut playback = playback(3);
        assert_eq!(playback.status().progress(), 0.0);

        let handle = playback.start().unwrap();
        let _ = playback.tick(handle);
        assert_eq!(playback.status().progress(), 0.25);

        let empty = PlaybackStatus {
            current_frame_index: 0,
            is_animating: false,
            total_frames: 0,
        };
        assert_eq!(empty.progress(), 0.0);
    }
}
