#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

/// Optional process-level resource reporting for long runs against slow
/// Jira instances. Disabled unless the user asks for it.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory_mb: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new();
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid: sysinfo::get_current_pid().ok(),
            start_time: Instant::now(),
            peak_memory_mb: Mutex::new(0),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn current_memory_mb(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let memory_mb = system.process(pid)?.memory() / 1024 / 1024;

        let mut peak = self.peak_memory_mb.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(memory_mb)
    }

    pub fn log_stats(&self, phase: &str) {
        if !self.enabled {
            return;
        }
        if let Some(memory_mb) = self.current_memory_mb() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Time: {:?}",
                phase,
                memory_mb,
                self.start_time.elapsed()
            );
        }
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let _ = self.current_memory_mb();
        if let Ok(peak) = self.peak_memory_mb.lock() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.start_time.elapsed(),
                *peak
            );
        }
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when the crate is built without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}
}
