use std::fs;
use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::info;
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::axis::format_tick;
use crate::drivers::csv_trace::LoadedTrace;
use crate::drivers::error::ExportError;
pub const TIME_AXIS_LABEL: &str = "Time (s)";
pub const VOLTAGE_AXIS_LABEL: &str = "Voltage (V)";
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: WHITE,
            foreground: BLACK,
            palette: vec![
                RGBColor(31, 119, 180),
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RGBColor(214, 39, 40),
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
            ],
        }
    }
}
impl PlotStyle {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}
/// Finite `(min, max)` over all values, widened when the span collapses.
pub fn padded_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return None;
    }
    if (max - min).abs() < f64::EPSILON {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
        return Some((min - pad, max + pad));
    }
    Some((min, max))
}
/// Largest PNG side accepted from configuration.
pub const MAX_PNG_SIDE: u32 = 16_384;
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize, ExportError> {
    let out_of_range = || ExportError::ImageSize { width, height };
    if width == 0 || height == 0 || width > MAX_PNG_SIDE || height > MAX_PNG_SIDE {
        return Err(out_of_range());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(out_of_range)
}
pub fn render_figure_png(figure: &LoadedTrace, style: &PlotStyle) -> Result<Vec<u8>, ExportError> {
    let buffer_len = rgb_buffer_len(style.width, style.height)?;
    let series: Vec<Vec<(f64, f64)>> = (0..figure.channel_count())
        .map(|idx| {
            figure
                .series(idx)
                .into_iter()
                .map(|[t, v]| (t, v))
                .collect()
        })
        .collect();
    let x_bounds = padded_bounds(series.iter().flatten().map(|p| p.0)).ok_or(ExportError::Empty)?;
    let y_bounds = padded_bounds(series.iter().flatten().map(|p| p.1)).ok_or(ExportError::Empty)?;
    let mut buffer = vec![0u8; buffer_len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(
                &figure.title,
                ("sans-serif", 22).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(x_bounds.0..x_bounds.1, y_bounds.0..y_bounds.1)?;
        let x_ticks = |x: &f64| format_tick(*x, x_bounds.0, x_bounds.1);
        let y_ticks = |y: &f64| format_tick(*y, y_bounds.0, y_bounds.1);
        chart
            .configure_mesh()
            .x_desc(TIME_AXIS_LABEL)
            .y_desc(VOLTAGE_AXIS_LABEL)
            .x_label_formatter(&x_ticks)
            .y_label_formatter(&y_ticks)
            .light_line_style(&style.foreground.mix(0.08))
            .draw()?;
        for (idx, points) in series.into_iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(format!("Ch {}", idx + 1))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&style.foreground.mix(0.3))
            .background_style(&style.background.mix(0.9))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn export_figure_png(
    figure: &LoadedTrace,
    style: &PlotStyle,
    path: &Path,
) -> Result<(), ExportError> {
    let png = render_figure_png(figure, style)?;
    fs::write(path, png)?;
    info!("exported {} to {}", figure.title, path.display());
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ExportError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::PathBuf;
    #[test]
    fn bounds_skip_nan_and_pad_flat_lines() {
        assert_eq!(padded_bounds([1.0, f64::NAN, 3.0]), Some((1.0, 3.0)));
        assert_eq!(padded_bounds([0.0, 0.0]), Some((-1.0, 1.0)));
        assert_eq!(padded_bounds([2.0]), Some((1.0, 3.0)));
        assert_eq!(padded_bounds([f64::NAN]), None);
    }
    #[test]
    fn figure_without_finite_samples_is_not_rendered() {
        let figure = LoadedTrace {
            path: PathBuf::from("blank.csv"),
            title: "blank".into(),
            data: array![[0.0, f64::NAN], [1.0, f64::NAN]],
        };
        assert!(matches!(
            render_figure_png(&figure, &PlotStyle::default()),
            Err(ExportError::Empty)
        ));
    }
    #[test]
    fn image_size_is_checked_before_allocating() {
        assert_eq!(rgb_buffer_len(1200, 600).unwrap(), 2_160_000);
        assert!(rgb_buffer_len(MAX_PNG_SIDE, MAX_PNG_SIDE).is_ok());
        let figure = LoadedTrace {
            path: PathBuf::from("ok.csv"),
            title: "ok".into(),
            data: array![[0.0, 1.0], [1.0, 2.0]],
        };
        for (width, height) in [(u32::MAX, u32::MAX), (70_000, 70_000), (0, 600), (1200, 0)] {
            assert!(matches!(
                render_figure_png(&figure, &PlotStyle::with_size(width, height)),
                Err(ExportError::ImageSize { .. })
            ));
        }
    }
}
