// src/gui.rs
use std::path::PathBuf;
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use log::{error, info};
use crate::config::FigureConfig;
use crate::drivers::axis::format_tick;
use crate::drivers::plot::{export_figure_png, PlotStyle, TIME_AXIS_LABEL, VOLTAGE_AXIS_LABEL};
use crate::drivers::{LoadedTrace, PlotBatch};
const PALETTE: [Color32; 6] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
];
struct FigureWindow {
    trace: LoadedTrace,
    series: Vec<Vec<[f64; 2]>>,
    open: bool,
}
/// One floating figure window per loaded file.
pub struct FigureApp {
    figures: Vec<FigureWindow>,
    export_dir: PathBuf,
    window_size: [f32; 2],
    png_style: PlotStyle,
    status: Option<String>,
}
impl FigureApp {
    pub fn new(batch: PlotBatch, config: &FigureConfig) -> Self {
        let figures = batch
            .figures
            .into_iter()
            .map(|trace| {
                let series = (0..trace.channel_count()).map(|ch| trace.series(ch)).collect();
                FigureWindow {
                    trace,
                    series,
                    open: true,
                }
            })
            .collect();
        Self {
            figures,
            export_dir: batch.export_dir,
            window_size: [config.window_width, config.window_height],
            png_style: PlotStyle::with_size(config.png_width, config.png_height),
            status: None,
        }
    }
    fn export(&mut self, idx: usize) {
        let Some(figure) = self.figures.get(idx) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name(format!("{}.png", figure.trace.title))
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            return;
        };
        match export_figure_png(&figure.trace, &self.png_style, &path) {
            Ok(()) => {
                self.status = Some(format!("Saved {}", path.display()));
                if let Some(dir) = path.parent() {
                    self.export_dir = dir.to_path_buf();
                }
            }
            Err(e) => {
                error!("export of {} failed: {e}", figure.trace.title);
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }
}
fn figure_plot(ui: &mut egui::Ui, idx: usize, series: &[Vec<[f64; 2]>]) {
    Plot::new(("figure_plot", idx))
        .legend(Legend::default())
        .x_axis_label(TIME_AXIS_LABEL)
        .y_axis_label(VOLTAGE_AXIS_LABEL)
        .x_axis_formatter(|mark, _chars, range| format_tick(mark.value, *range.start(), *range.end()))
        .y_axis_formatter(|mark, _chars, range| format_tick(mark.value, *range.start(), *range.end()))
        .show(ui, |plot_ui| {
            for (ch, points) in series.iter().enumerate() {
                plot_ui.line(
                    Line::new(PlotPoints::new(points.clone()))
                        .name(format!("Ch {}", ch + 1))
                        .color(PALETTE[ch % PALETTE.len()]),
                );
            }
        });
}
impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut exports = Vec::new();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Export folder: {}", self.export_dir.display()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Figures");
            for figure in &mut self.figures {
                ui.checkbox(&mut figure.open, figure.trace.title.as_str());
            }
        });
        for (idx, figure) in self.figures.iter_mut().enumerate() {
            let FigureWindow {
                trace,
                series,
                open,
            } = figure;
            let offset = 30.0 * idx as f32;
            egui::Window::new(trace.title.as_str())
                .id(egui::Id::new(("figure", idx)))
                .default_pos([180.0 + offset, 20.0 + offset])
                .default_size(self.window_size)
                .open(open)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("💾 Save PNG").clicked() {
                            exports.push(idx);
                        }
                        ui.label(trace.path.display().to_string());
                    });
                    figure_plot(ui, idx, series);
                });
        }
        for idx in exports {
            self.export(idx);
        }
    }
}
/// Shows the batch until the window is closed.
pub fn run(batch: PlotBatch, config: &FigureConfig) -> eframe::Result<()> {
    info!("showing {} figure(s)", batch.figures.len());
    let app = FigureApp::new(batch, config);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_title("scopetrace");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("scopetrace", options, Box::new(move |_cc| Box::new(app)))
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    #[test]
    fn one_open_window_per_figure() {
        let trace = |name: &str| LoadedTrace {
            path: PathBuf::from(format!("/lab/{name}.csv")),
            title: name.to_owned(),
            data: array![[0.0, 1.0, 2.0], [1e-3, f64::NAN, 3.0]],
        };
        let batch = PlotBatch {
            figures: vec![trace("a"), trace("b")],
            export_dir: PathBuf::from("/lab"),
        };
        let app = FigureApp::new(batch, &FigureConfig::default());
        assert_eq!(app.figures.len(), 2);
        assert!(app.figures.iter().all(|f| f.open));
        assert_eq!(app.figures[0].series.len(), 2);
        assert_eq!(app.figures[0].series[0], vec![[0.0, 1.0]]);
        assert_eq!(app.figures[0].series[1], vec![[0.0, 2.0], [1e-3, 3.0]]);
        assert_eq!(app.export_dir, PathBuf::from("/lab"));
    }
}
