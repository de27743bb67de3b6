use std::sync::{Arc, Mutex, MutexGuard};

/// Shared view of a running generation's progress.
///
/// Cloning the handle shares the same progress, so a consumer thread can poll it while the
/// generator thread updates it.
#[derive(Clone, Debug)]
pub struct ProgressHandle {
    progress: Arc<Mutex<Progress>>,
}

impl ProgressHandle {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(Progress::new_empty())),
        }
    }

    pub fn lock(&self) -> MutexGuard<Progress> {
        // progress is plain data, a poisoned lock still holds a usable value
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn progress(&self) -> Progress {
        *self.lock()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub from: usize,
    pub is_done: bool,
}

impl Progress {
    pub fn new(done: usize, from: usize) -> Self {
        Self {
            done,
            from,
            is_done: false,
        }
    }

    pub fn new_empty() -> Self {
        Self::new(0, 0)
    }

    pub fn percent(&self) -> f32 {
        if self.from == 0 {
            return if self.is_done { 1.0 } else { 0.0 };
        }

        self.done as f32 / self.from as f32
    }

    pub fn finish(&mut self) {
        self.done = self.from;
        self.is_done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_between_clones() {
        let handle = ProgressHandle::new();
        let other = handle.clone();
        handle.lock().from = 4;
        handle.lock().done = 1;
        assert_eq!(other.progress(), Progress::new(1, 4));
        assert_eq!(other.progress().percent(), 0.25);
    }

    #[test]
    fn finish() {
        let mut progress = Progress::new(2, 10);
        progress.finish();
        assert_eq!(progress.done, 10);
        assert!(progress.is_done);
        assert_eq!(Progress::new_empty().percent(), 0.0);
    }
}
