// src/drivers/mod.rs
pub mod axis;
pub mod batch;
pub mod block;
pub mod csv_trace;
pub mod decode;
pub mod error;
pub mod plot;
pub mod preamble;
pub mod trace_writer;
pub use batch::{load_batch, BatchOutcome, PlotBatch};
pub use block::{parse_block, write_block};
pub use csv_trace::{load_trace_csv, LoadedTrace};
pub use decode::{
    decode, decode_ascii, decode_with_preamble, ByteOrder, SampleFormat, SampleWidth, Trace,
    WaveformMeta,
};
pub use error::{ExportError, FileLoadError, FileLoadErrorKind, MalformedBlockError, PreambleError};
pub use plot::{export_figure_png, render_figure_png, PlotStyle};
pub use preamble::{AcquisitionType, Preamble, WaveformFormat};
pub use trace_writer::write_trace_csv;
