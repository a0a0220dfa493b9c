use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum MalformedBlockError {
    #[error("block must start with '#', found {found:?}")]
    MissingMarker { found: Option<u8> },
    #[error("block header digit count is not a digit: {0:#04x}")]
    InvalidDigitCount(u8),
    #[error("block header declares {expected} length digits but only {available} bytes follow")]
    TruncatedHeader { expected: usize, available: usize },
    #[error("block length digits are not numeric: {0:?}")]
    InvalidLengthDigits(String),
    #[error("block declares {declared} payload bytes but only {available} are available")]
    Truncated { declared: usize, available: usize },
    #[error("block declares {declared} payload bytes but {extra} unexpected bytes follow it")]
    TrailingBytes { declared: usize, extra: usize },
    #[error("payload of {len} bytes is not a whole number of {width}-byte samples")]
    PayloadNotAligned { len: usize, width: usize },
    #[error("expected {expected} samples, block holds {actual}")]
    PointCountMismatch { expected: usize, actual: usize },
    #[error("payload of {0} bytes does not fit a nine-digit block header")]
    PayloadTooLarge(usize),
    #[error("ASCii payload is not valid text")]
    AsciiNotUtf8,
    #[error("ASCii sample {index} is not a number: {value:?}")]
    InvalidAsciiSample { index: usize, value: String },
}
#[derive(Debug, Error)]
pub enum PreambleError {
    #[error("preamble has {0} fields, expected 10")]
    FieldCount(usize),
    #[error("unknown waveform format code {0:?}")]
    UnknownFormat(String),
    #[error("unknown acquisition type code {0:?}")]
    UnknownAcquisition(String),
    #[error("preamble field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
#[derive(Debug, Error)]
pub enum FileLoadErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row} has {found} cells, expected at most {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("file holds no data rows")]
    NoRows,
    #[error("file has a time column but no signal columns")]
    NoSignalColumns,
    #[error("file holds no numeric time or voltage values")]
    NoNumericData,
}
/// A trace file that could not be loaded, tagged with its path.
#[derive(Debug, Error)]
#[error("failed to load {}: {kind}", .path.display())]
pub struct FileLoadError {
    pub path: PathBuf,
    #[source]
    pub kind: FileLoadErrorKind,
}
impl FileLoadError {
    pub fn new(path: impl Into<PathBuf>, kind: impl Into<FileLoadErrorKind>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }
}
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("figure has no samples to render")]
    Empty,
    #[error("image size {width}x{height} is out of range")]
    ImageSize { width: u32, height: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ExportError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ExportError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ExportError {
    fn from(value: image::ImageError) -> Self {
        ExportError::Plot(value.to_string())
    }
}
