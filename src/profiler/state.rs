use dashmap::DashMap;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

/// Cumulative time spent in each profiled operation
///
/// Keys have the form `<implementing type>#<operation>`. Entries are only ever created or
/// increased, and can be updated concurrently from any number of calls.
#[derive(Debug, Default)]
pub struct ProfilingState {
    data: DashMap<String, Duration>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the total of `implementation#operation`
    pub fn record(&self, implementation: &str, operation: &str, elapsed: Duration) {
        *self
            .data
            .entry(format_call(implementation, operation))
            .or_insert(Duration::ZERO) += elapsed;
    }

    /// Total recorded for a key, if any call was recorded under it
    pub fn get(&self, key: &str) -> Option<Duration> {
        self.data.get(key).map(|entry| *entry.value())
    }

    /// A point-in-time copy of every entry, ordered by key
    pub fn snapshot(&self) -> BTreeMap<String, Duration> {
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Writes one `<key> took <duration>` line per entry, ordered by key
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (key, elapsed) in self.snapshot() {
            writeln!(writer, "{} took {}", key, format_duration(elapsed))?;
        }
        Ok(())
    }
}

/// Builds the profiling key of a call
pub fn format_call(implementation: &str, operation: &str) -> String {
    format!("{}#{}", implementation, operation)
}

/// Formats a duration as `<minutes>m <seconds>s <millis>ms`
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}
