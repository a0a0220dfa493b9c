//! Keysight oscilloscope waveform decoding and CSV trace plotting.
pub mod config;
pub mod drivers;
pub mod gui;
pub use config::{AppConfig, FigureConfig};
pub use drivers::{
    decode, load_batch, BatchOutcome, MalformedBlockError, FileLoadError, Trace, WaveformMeta,
};
