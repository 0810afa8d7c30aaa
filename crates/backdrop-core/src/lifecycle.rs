//! Mount/unmount bookkeeping.
//!
//! Every resource acquired while mounting registers a teardown step; unmount
//! runs them in reverse acquisition order exactly once. A partially mounted
//! instance unwinds the steps it managed to register.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Mounted,
    Disposed,
}

/// Explicit release of an owned GPU or host resource.
pub trait Dispose {
    fn dispose(self);
}

type Step = (&'static str, Box<dyn FnOnce()>);

#[derive(Default)]
pub struct Teardown {
    steps: Vec<Step>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, label: &'static str, step: impl FnOnce() + 'static) {
        self.steps.push((label, Box::new(step)));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run and forget every registered step, newest first. Returns how many ran.
    pub fn run(&mut self) -> usize {
        let mut ran = 0;
        while let Some((label, step)) = self.steps.pop() {
            log::debug!("[teardown] {}", label);
            step();
            ran += 1;
        }
        ran
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

pub struct Lifecycle {
    phase: Phase,
    teardown: Teardown,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            teardown: Teardown::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    /// Register a step; ignored once disposed, where the step runs immediately
    /// instead so late acquisitions are never leaked.
    pub fn defer(&mut self, label: &'static str, step: impl FnOnce() + 'static) {
        if self.phase == Phase::Disposed {
            log::debug!("[teardown] {} (late)", label);
            step();
            return;
        }
        self.teardown.defer(label, step);
    }

    pub fn mark_mounted(&mut self) {
        if self.phase == Phase::Uninitialized {
            self.phase = Phase::Mounted;
        }
    }

    /// Idempotent. Returns the number of teardown steps that ran.
    pub fn unmount(&mut self) -> usize {
        if self.phase == Phase::Disposed {
            return 0;
        }
        self.phase = Phase::Disposed;
        self.teardown.run()
    }
}
