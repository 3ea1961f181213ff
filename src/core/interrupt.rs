//! Ctrl-C handling for a session.
//!
//! The handler never exits the process. It records the interrupt and
//! forwards SIGINT to the interactive child, so the lifecycle can unwind
//! normally and still remove the container.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct InterruptSignal {
    interrupted: Arc<AtomicBool>,
    child: Arc<Mutex<Option<u32>>>,
}

impl InterruptSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the process-wide Ctrl-C handler. Only one may be installed.
    pub fn install() -> anyhow::Result<Self> {
        let signal = Self::new();
        let handler_signal = signal.clone();
        ctrlc::set_handler(move || {
            eprintln!("\n🛑 Received interrupt signal, cleaning up...");
            handler_signal.trigger();
        })?;
        Ok(signal)
    }

    pub fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        if let Ok(child) = self.child.lock() {
            if let Some(pid) = *child {
                forward_interrupt(pid);
            }
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn track_child(&self, pid: u32) {
        if let Ok(mut child) = self.child.lock() {
            *child = Some(pid);
        }
    }

    pub fn clear_child(&self) {
        if let Ok(mut child) = self.child.lock() {
            *child = None;
        }
    }

    pub fn tracked_child(&self) -> Option<u32> {
        self.child.lock().ok().and_then(|child| *child)
    }
}

#[cfg(unix)]
fn forward_interrupt(pid: u32) {
    // SAFETY: kill(2) has no memory-safety preconditions; a stale pid only
    // yields ESRCH.
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGINT);
    }
}

#[cfg(not(unix))]
fn forward_interrupt(_pid: u32) {}
