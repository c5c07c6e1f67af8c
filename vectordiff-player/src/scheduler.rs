//! Cancellable repeating frame task.
//!
//! The host owns the actual frame/timer source and calls back once per
//! display frame; the armed flag is the cancellation token. Disarming
//! guarantees that a tick already scheduled by the host does no work.

#[derive(Debug, Default)]
pub struct FrameScheduler {
    armed: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        assert!(!FrameScheduler::new().is_armed());
    }

    #[test]
    fn arm_and_disarm_toggle() {
        let mut scheduler = FrameScheduler::new();
        scheduler.arm();
        assert!(scheduler.is_armed());
        scheduler.disarm();
        scheduler.disarm();
        assert!(!scheduler.is_armed());
    }
}
