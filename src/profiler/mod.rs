//! Call profiling
//!
//! The profiler measures how long individual operations take without changing the code that
//! calls them. An interface opts in by implementing [`Instrumented`] for its trait-object
//! type, listing its operations and flagging the measured ones, and by implementing itself
//! for [`Profiled<dyn Interface>`] through [`Profiled::measure`]/[`Profiled::measure_async`].
//! [`Profiler::wrap`] then turns any implementation into a timed stand-in.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wordtide::profiler::{Instrumented, Operation, Profiled, Profiler};
//! use wordtide::SystemClock;
//!
//! trait Tokenizer: Send + Sync {
//!     fn tokenize(&self, text: &str) -> Vec<String>;
//!     fn name(&self) -> &'static str { std::any::type_name::<Self>() }
//! }
//!
//! impl Instrumented for dyn Tokenizer {
//!     const INTERFACE: &'static str = "Tokenizer";
//!     const OPERATIONS: &'static [Operation] = &[Operation::measured("tokenize")];
//!
//!     fn type_name(&self) -> &'static str { self.name() }
//! }
//!
//! impl Tokenizer for Profiled<dyn Tokenizer> {
//!     fn tokenize(&self, text: &str) -> Vec<String> {
//!         self.measure("tokenize", || self.inner().tokenize(text))
//!     }
//! }
//!
//! struct Whitespace;
//!
//! impl Tokenizer for Whitespace {
//!     fn tokenize(&self, text: &str) -> Vec<String> {
//!         text.split_whitespace().map(str::to_string).collect()
//!     }
//! }
//!
//! let profiler = Profiler::new(Arc::new(SystemClock));
//! let inner: Arc<dyn Tokenizer> = Arc::new(Whitespace);
//! let tokenizer: Arc<dyn Tokenizer> = Arc::new(profiler.wrap(inner).unwrap());
//!
//! assert_eq!(tokenizer.tokenize("a b").len(), 2);
//! assert_eq!(profiler.state().snapshot().len(), 1);
//! ```

mod profiled;
mod state;

pub use profiled::Profiled;
pub use state::{format_call, format_duration, ProfilingState};

use crate::clock::Clock;
use crate::ConfigError;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// One operation of an instrumented interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub measured: bool,
}

impl Operation {
    /// An operation whose calls are timed
    pub const fn measured(name: &'static str) -> Self {
        Self {
            name,
            measured: true,
        }
    }

    /// An operation whose calls pass through untimed
    pub const fn unmeasured(name: &'static str) -> Self {
        Self {
            name,
            measured: false,
        }
    }
}

/// Declares the operations of an interface for profiling
///
/// Implemented for the interface's trait-object type, e.g. `impl Instrumented for dyn
/// PageFetcher`.
pub trait Instrumented {
    /// Interface name, used in error messages
    const INTERFACE: &'static str;

    /// Every operation of the interface
    const OPERATIONS: &'static [Operation];

    /// Name of the concrete type behind this interface object
    fn type_name(&self) -> &'static str;
}

/// Owns the profiling table and builds timed stand-ins that feed it
pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    start_time: DateTime<Utc>,
}

impl Profiler {
    /// Creates a profiler whose run starts now, according to `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let start_time = clock.now_utc();
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            start_time,
        }
    }

    /// Wraps `delegate` in a stand-in that records its measured calls
    ///
    /// # Errors
    ///
    /// [`ConfigError::NothingToProfile`] if the interface declares no measured operation.
    pub fn wrap<I>(&self, delegate: Arc<I>) -> Result<Profiled<I>, ConfigError>
    where
        I: ?Sized + Instrumented,
    {
        if !I::OPERATIONS.iter().any(|op| op.measured) {
            return Err(ConfigError::NothingToProfile {
                interface: I::INTERFACE,
            });
        }

        Ok(Profiled::new(
            delegate,
            self.state.clone(),
            self.clock.clone(),
        ))
    }

    /// The table every stand-in built by this profiler records into
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Wall-clock time the profiler was created, printed in the report header
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Writes the report: a `Run at` header, one line per profiled call, then a blank line
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.start_time.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(writer)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_report_to_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_report(&mut writer)
    }
}
