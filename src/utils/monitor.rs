#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

/// Logs process CPU/memory after each pipeline stage. A disabled monitor
/// does nothing, as does the stub built without the `cli` feature.
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: System,
    pid: Pid,
    start: Instant,
    peak_memory_mb: u64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_all();
        system.refresh_all();
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");

        Self {
            system,
            pid,
            start: Instant::now(),
            peak_memory_mb: 0,
            enabled,
        }
    }

    pub fn log_stats(&mut self, stage: &str) {
        if !self.enabled {
            return;
        }
        self.system.refresh_all();
        let Some(process) = self.system.process(self.pid) else {
            return;
        };

        let memory_mb = process.memory() / 1024 / 1024;
        if memory_mb > self.peak_memory_mb {
            self.peak_memory_mb = memory_mb;
        }

        tracing::info!(
            "{} stage - CPU: {:.1}%, memory: {}MB (peak {}MB), elapsed: {:?}",
            stage,
            process.cpu_usage(),
            memory_mb,
            self.peak_memory_mb,
            self.start.elapsed()
        );
    }

    pub fn log_final_stats(&mut self) {
        if !self.enabled {
            return;
        }
        self.log_stats("load");
        tracing::info!(
            "Run complete - total time: {:?}, peak memory: {}MB",
            self.start.elapsed(),
            self.peak_memory_mb
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(not(feature = "cli"))]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&mut self, _stage: &str) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
