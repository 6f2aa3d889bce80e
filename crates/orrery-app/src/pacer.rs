//! Frame pacing to a fixed target rate.
//!
//! Animation is frame-locked (phases advance a fixed amount per frame), so
//! the pacer is what turns "degrees per frame" into a steady on-screen speed.

use std::time::{Duration, Instant};

use tracing::trace;

/// Sleeps until the next frame deadline.
///
/// Deadlines advance by one interval per frame. A frame that overruns its
/// deadline resets the schedule to "now" instead of trying to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    deadline: Instant,
    frame_count: u64,
    late_frames: u64,
}

impl FramePacer {
    /// A pacer for `target_fps` frames per second. 0 disables pacing.
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, start: Instant) -> Self {
        Self {
            interval: match target_fps {
                0 => Duration::ZERO,
                fps => Duration::from_secs(1) / fps,
            },
            deadline: start,
            frame_count: 0,
            late_frames: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_unlimited(&self) -> bool {
        self.interval.is_zero()
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames that finished after their deadline.
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Move to the next deadline and return how long to sleep from `now`.
    pub fn advance(&mut self, now: Instant) -> Duration {
        self.frame_count += 1;
        if self.is_unlimited() {
            self.deadline = now;
            return Duration::ZERO;
        }
        self.deadline += self.interval;
        if self.deadline <= now {
            self.late_frames += 1;
            self.deadline = now;
            return Duration::ZERO;
        }
        self.deadline - now
    }

    /// Block until the end of the current frame interval.
    pub fn wait(&mut self) {
        let sleep = self.advance(Instant::now());
        if !sleep.is_zero() {
            trace!("Sleeping {:.2}ms until next frame", sleep.as_secs_f64() * 1000.0);
            std::thread::sleep(sleep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_zero_fps_disables_pacing() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(0, start);
        assert!(pacer.is_unlimited());
        assert_eq!(pacer.interval(), Duration::ZERO);
        assert_eq!(pacer.advance(start), Duration::ZERO);
        assert_eq!(pacer.late_frames(), 0);
        assert_eq!(pacer.frame_count(), 1);

        let before = Instant::now();
        for _ in 0..100 {
            pacer.wait();
        }
        assert!(before.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_on_time_frame_sleeps_remaining() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50, start);
        let sleep = pacer.advance(start + Duration::from_millis(5));
        assert_eq!(sleep, Duration::from_millis(15));
        assert_eq!(pacer.deadline(), start + Duration::from_millis(20));
        assert_eq!(pacer.late_frames(), 0);
    }

    #[test]
    fn test_deadlines_are_evenly_spaced() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50, start);
        for frame in 1..=10u32 {
            let now = start + Duration::from_millis(20) * (frame - 1) + Duration::from_millis(3);
            pacer.advance(now);
            assert_eq!(pacer.deadline(), start + Duration::from_millis(20) * frame);
        }
        assert_eq!(pacer.frame_count(), 10);
    }

    #[test]
    fn test_late_frame_does_not_accumulate_debt() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50, start);
        let late = start + Duration::from_millis(100);
        assert_eq!(pacer.advance(late), Duration::ZERO);
        assert_eq!(pacer.deadline(), late);
        assert_eq!(pacer.late_frames(), 1);

        // The next frame gets a full interval again.
        let sleep = pacer.advance(late + Duration::from_millis(2));
        assert_eq!(sleep, Duration::from_millis(18));
    }

    #[test]
    fn test_wait_blocks_roughly_one_interval() {
        let before = Instant::now();
        let mut pacer = FramePacer::new(200);
        pacer.wait();
        assert!(before.elapsed() >= Duration::from_millis(4));
    }
}
