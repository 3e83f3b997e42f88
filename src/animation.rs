//! Cancellable per-frame loop
//!
//! The host delivers one callback per display refresh. [`AnimationHandle`]
//! owns the outstanding request: `fire` runs the tick and re-arms,
//! `stop` cancels the pending request, and any callback that still arrives
//! after `stop` is ignored.

/// Host primitive that calls back once on the next display frame
pub trait FrameScheduler {
    /// Token identifying an outstanding request
    type Request: Copy;

    /// Arm the next frame callback. `None` if the host refused.
    fn request(&mut self) -> Option<Self::Request>;

    /// Withdraw an outstanding request
    fn cancel(&mut self, request: Self::Request);
}

/// Owned handle over a self-rearming frame loop
pub struct AnimationHandle<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Request>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> AnimationHandle<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
            frames: 0,
        }
    }

    /// Arm the first frame. Does nothing if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return true;
        }
        self.pending = self.scheduler.request();
        self.running = self.pending.is_some();
        if !self.running {
            log::warn!("Frame scheduler refused the first request");
        }
        self.running
    }

    /// Cancel the pending frame; no tick runs after this returns
    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel(request);
        }
        self.running = false;
    }

    /// Handle a delivered frame callback.
    ///
    /// Runs `tick` and arms the next frame, unless the loop was stopped or
    /// nothing was pending. Returns whether `tick` ran.
    pub fn fire<F: FnOnce()>(&mut self, tick: F) -> bool {
        if !self.running || self.pending.take().is_none() {
            return false;
        }

        tick();
        self.frames += 1;

        self.pending = self.scheduler.request();
        if self.pending.is_none() {
            log::warn!("Frame scheduler refused a request, animation halted");
            self.running = false;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<S: FrameScheduler> Drop for AnimationHandle<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        next: u32,
        armed: Vec<u32>,
        cancelled: Vec<u32>,
        refuse: bool,
    }

    #[derive(Clone, Default)]
    struct ManualFrames(Rc<RefCell<Log>>);

    impl FrameScheduler for ManualFrames {
        type Request = u32;

        fn request(&mut self) -> Option<u32> {
            let mut log = self.0.borrow_mut();
            if log.refuse {
                return None;
            }
            log.next += 1;
            let id = log.next;
            log.armed.push(id);
            Some(id)
        }

        fn cancel(&mut self, request: u32) {
            self.0.borrow_mut().cancelled.push(request);
        }
    }

    #[test]
    fn test_start_arms_once() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        assert!(handle.start());
        assert!(handle.start());
        assert_eq!(frames.0.borrow().armed, vec![1]);
    }

    #[test]
    fn test_fire_ticks_and_rearms() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        handle.start();

        let mut ticks = 0;
        for _ in 0..5 {
            assert!(handle.fire(|| ticks += 1));
        }
        assert_eq!(ticks, 5);
        assert_eq!(handle.frames(), 5);
        assert_eq!(frames.0.borrow().armed.len(), 6);
    }

    #[test]
    fn test_fire_before_start_is_ignored() {
        let mut handle = AnimationHandle::new(ManualFrames::default());
        let mut ticked = false;
        assert!(!handle.fire(|| ticked = true));
        assert!(!ticked);
    }

    #[test]
    fn test_stop_cancels_pending_and_blocks_late_callbacks() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        handle.start();
        handle.fire(|| {});
        handle.stop();

        assert!(!handle.is_running());
        assert_eq!(frames.0.borrow().cancelled, vec![2]);

        // A callback the host had already queued arrives late
        let mut ticked = false;
        assert!(!handle.fire(|| ticked = true));
        assert!(!ticked);
        assert_eq!(frames.0.borrow().armed.len(), 2);
    }

    #[test]
    fn test_restart_after_stop() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        handle.start();
        handle.stop();
        assert!(handle.start());
        assert!(handle.fire(|| {}));
    }

    #[test]
    fn test_pause_and_resume_continue_counting() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        handle.start();
        for _ in 0..3 {
            handle.fire(|| {});
        }

        // Page parked in the back/forward cache
        handle.stop();
        assert!(!handle.fire(|| {}));
        assert_eq!(frames.0.borrow().cancelled, vec![4]);

        // Page restored
        assert!(handle.start());
        assert!(handle.is_running());
        assert!(handle.fire(|| {}));
        assert_eq!(handle.frames(), 4);
        assert_eq!(frames.0.borrow().armed, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_refused_request_halts() {
        let frames = ManualFrames::default();
        let mut handle = AnimationHandle::new(frames.clone());
        handle.start();
        frames.0.borrow_mut().refuse = true;

        assert!(handle.fire(|| {}));
        assert!(!handle.is_running());
        assert!(!handle.fire(|| {}));
    }

    #[test]
    fn test_drop_cancels() {
        let frames = ManualFrames::default();
        {
            let mut handle = AnimationHandle::new(frames.clone());
            handle.start();
        }
        assert_eq!(frames.0.borrow().cancelled, vec![1]);
    }
}
