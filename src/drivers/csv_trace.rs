use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use ndarray::{Array2, ArrayView1};
use crate::drivers::error::{FileLoadError, FileLoadErrorKind};
/// One CSV trace file loaded into memory with its time column shifted to zero.
#[derive(Clone, Debug)]
pub struct LoadedTrace {
    pub path: PathBuf,
    pub title: String,
    pub data: Array2<f64>, // rows x (time + channels)
}
impl LoadedTrace {
    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.data.column(0)
    }
    pub fn channel_count(&self) -> usize {
        self.data.ncols().saturating_sub(1)
    }
    pub fn channel(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.data.column(idx + 1)
    }
    /// `[time, voltage]` pairs of one channel; NaN cells are left out.
    pub fn series(&self, idx: usize) -> Vec<[f64; 2]> {
        self.time()
            .iter()
            .zip(self.channel(idx).iter())
            .filter(|(t, v)| t.is_finite() && v.is_finite())
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}
pub fn load_trace_csv(path: &Path) -> Result<LoadedTrace, FileLoadError> {
    let file = File::open(path).map_err(|e| FileLoadError::new(path, e))?;
    let mut data = parse_trace_csv(file).map_err(|kind| FileLoadError::new(path, kind))?;
    shift_time_to_zero(&mut data);
    info!(
        "loaded {}: {} rows, {} channel(s)",
        path.display(),
        data.nrows(),
        data.ncols() - 1
    );
    Ok(LoadedTrace {
        path: path.to_path_buf(),
        title: figure_title(path),
        data,
    })
}
/// Reads comma-delimited numbers without a header row. Unparsable or missing
/// cells become NaN; the first row fixes the column count.
pub fn parse_trace_csv<R: Read>(reader: R) -> Result<Array2<f64>, FileLoadErrorKind> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width = 0;
    let mut nan_cells = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if rows.is_empty() {
            width = record.len();
        } else if record.len() > width {
            return Err(FileLoadErrorKind::RaggedRow {
                row: row + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut values: Vec<f64> = record
            .iter()
            .map(|cell| cell.parse::<f64>().unwrap_or(f64::NAN))
            .collect();
        values.resize(width, f64::NAN);
        nan_cells += values.iter().filter(|v| v.is_nan()).count();
        rows.push(values);
    }
    if rows.is_empty() {
        return Err(FileLoadErrorKind::NoRows);
    }
    if width < 2 {
        return Err(FileLoadErrorKind::NoSignalColumns);
    }
    let finite_time = rows.iter().any(|row| row[0].is_finite());
    let finite_signal = rows.iter().any(|row| row[1..].iter().any(|v| v.is_finite()));
    if !(finite_time && finite_signal) {
        return Err(FileLoadErrorKind::NoNumericData);
    }
    if nan_cells > 0 {
        warn!("{nan_cells} cell(s) could not be read as numbers and were set to NaN");
    }
    Ok(Array2::from_shape_fn((rows.len(), width), |(r, c)| {
        rows[r][c]
    }))
}
/// Shifts column 0 so its smallest finite value becomes zero.
pub fn shift_time_to_zero(data: &mut Array2<f64>) {
    if data.ncols() == 0 {
        return;
    }
    let min = data
        .column(0)
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        data.column_mut(0).mapv_inplace(|t| t - min);
    }
}
/// File name with the extension stripped.
pub fn figure_title(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
#[cfg(test)]
mod tests {
    use super::*;
    fn parse(text: &str) -> Result<Array2<f64>, FileLoadErrorKind> {
        parse_trace_csv(text.as_bytes())
    }
    fn assert_column(actual: ArrayView1<f64>, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{a} != {e}");
        }
    }
    #[test]
    fn time_already_at_zero_is_unchanged() {
        let mut data = parse("0.0,1.1\n0.001,2.2\n0.002,3.3\n").unwrap();
        shift_time_to_zero(&mut data);
        assert_column(data.column(0), &[0.0, 0.001, 0.002]);
        assert_column(data.column(1), &[1.1, 2.2, 3.3]);
    }
    #[test]
    fn time_is_shifted_to_start_at_zero() {
        let mut data = parse("5.0,1\n5.001,2\n5.002,3\n").unwrap();
        shift_time_to_zero(&mut data);
        assert_column(data.column(0), &[0.0, 0.001, 0.002]);
    }
    #[test]
    fn minimum_is_used_even_when_rows_are_unordered() {
        let mut data = parse("2.0,0\n1.0,0\n3.0,0\n").unwrap();
        shift_time_to_zero(&mut data);
        assert_column(data.column(0), &[1.0, 0.0, 2.0]);
    }
    #[test]
    fn bad_and_missing_cells_become_nan() {
        let data = parse("0,1,2\n1,oops,3\n2,4\n").unwrap();
        assert_eq!(data.dim(), (3, 3));
        assert!(data[[1, 1]].is_nan());
        assert!(data[[2, 2]].is_nan());
        assert_eq!(data[[2, 1]], 4.0);
    }
    #[test]
    fn nan_time_cells_are_ignored_for_the_shift() {
        let mut data = parse("x,1\n10,2\n11,3\n").unwrap();
        shift_time_to_zero(&mut data);
        assert!(data[[0, 0]].is_nan());
        assert_eq!(data[[1, 0]], 0.0);
        assert_eq!(data[[2, 0]], 1.0);
    }
    #[test]
    fn multiple_channels_and_whitespace() {
        let data = parse(" 0 , 1 , -1\n\n1, 2, -2\n").unwrap();
        assert_eq!(data.dim(), (2, 3));
        assert_eq!(data[[1, 2]], -2.0);
    }
    #[test]
    fn rejects_unusable_tables() {
        assert!(matches!(parse(""), Err(FileLoadErrorKind::NoRows)));
        assert!(matches!(parse("0\n1\n2\n"), Err(FileLoadErrorKind::NoSignalColumns)));
        assert!(matches!(
            parse("0,1\n1,2,3\n"),
            Err(FileLoadErrorKind::RaggedRow { row: 2, expected: 2, found: 3 })
        ));
    }
    #[test]
    fn rejects_files_without_numbers() {
        assert!(matches!(parse("time,ch1\nfoo,bar\n"), Err(FileLoadErrorKind::NoNumericData)));
        assert!(matches!(parse("time,ch1\n"), Err(FileLoadErrorKind::NoNumericData)));
        assert!(matches!(
            parse("{\"a\": 1, \"b\": 2}\n"),
            Err(FileLoadErrorKind::NoNumericData)
        ));
        // time present but every signal cell unreadable
        assert!(matches!(parse("0,x\n1,y\n"), Err(FileLoadErrorKind::NoNumericData)));
        assert!(matches!(parse("a,1\nb,2\n"), Err(FileLoadErrorKind::NoNumericData)));
        assert!(parse("time,ch1\n0,1\n").is_ok());
    }
    #[test]
    fn series_skips_nan_points() {
        let trace = LoadedTrace {
            path: PathBuf::from("a.csv"),
            title: "a".into(),
            data: parse("0,1\n1,nan?\n2,3\n").unwrap(),
        };
        assert_eq!(trace.channel_count(), 1);
        assert_eq!(trace.series(0), vec![[0.0, 1.0], [2.0, 3.0]]);
    }
    #[test]
    fn title_strips_extension() {
        assert_eq!(figure_title(Path::new("/data/run_07.csv")), "run_07");
        assert_eq!(figure_title(Path::new("trace.tar.csv")), "trace.tar");
    }
    #[test]
    fn missing_file_reports_its_path() {
        let path = std::env::temp_dir().join("scopetrace_does_not_exist.csv");
        let err = load_trace_csv(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(matches!(err.kind, FileLoadErrorKind::Io(_)));
    }
}
