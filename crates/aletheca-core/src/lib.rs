//! Aletheca Core - shared infrastructure for the aletheca binaries
//!
//! Logging, progress reporting, client settings and local input handling.

pub mod input;
pub mod logging;
pub mod progress;
pub mod settings;

// Re-exports for convenience
pub use input::{ByteCounter, InputError, InputFile, InputFormat, expand_inputs};
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use settings::{ApiSettings, ClientSettings, SettingsError};
