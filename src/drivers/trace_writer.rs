use std::io::Write;
use std::path::Path;
use csv::{Terminator, WriterBuilder};
use log::info;
use crate::drivers::decode::Trace;
use crate::drivers::error::ExportError;
/// Writes `time,voltage` rows without a header, the layout the CSV loader reads.
pub fn write_trace<W: Write>(writer: W, trace: &Trace) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for (t, v) in trace.points() {
        writer.write_record([t.to_string(), v.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
pub fn write_trace_csv(path: &Path, trace: &Trace) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_trace(file, trace)?;
    info!("wrote {} points to {}", trace.len(), path.display());
    Ok(())
}
