//! Load a saved timing record, print per-strategy means and show a log-scale
//! scatter plot of elapsed time per trial
//!
//! Reads `times.dat` unless `INTERLEAVE_RECORD` points elsewhere. A missing or
//! corrupt record is fatal.

use anyhow::Context;
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};
use interleave_bench::config::resolve_record_path;
use interleave_bench::plot::ScatterPlot;
use interleave_bench::{init_logging, TimingRecord};

const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 190.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 50.0;
const POINT_RADIUS: f32 = 4.0;

/// Series colours, cycled
const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

struct TimesPlotterApp {
    plot: ScatterPlot,
}

impl TimesPlotterApp {
    fn new(plot: ScatterPlot) -> Self {
        TimesPlotterApp { plot }
    }

    fn paint(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let full = response.rect;
        painter.rect_filled(full, 0.0, Color32::WHITE);

        let area = Rect::from_min_max(
            Pos2::new(full.left() + MARGIN_LEFT, full.top() + MARGIN_TOP),
            Pos2::new(full.right() - MARGIN_RIGHT, full.bottom() - MARGIN_BOTTOM),
        );
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return;
        }

        let to_screen = |u: f64, v: f64| {
            Pos2::new(
                area.left() + u as f32 * area.width(),
                area.bottom() - v as f32 * area.height(),
            )
        };

        let axis = Stroke::new(1.0, Color32::BLACK);
        let grid = Stroke::new(1.0, Color32::from_gray(225));
        let label_font = FontId::proportional(13.0);

        // Title and axis labels
        painter.text(
            Pos2::new(area.center().x, full.top() + MARGIN_TOP / 2.0),
            Align2::CENTER_CENTER,
            &self.plot.title,
            FontId::proportional(18.0),
            Color32::BLACK,
        );
        painter.text(
            Pos2::new(area.center().x, full.bottom() - MARGIN_BOTTOM / 3.0),
            Align2::CENTER_CENTER,
            self.plot.x_label,
            label_font.clone(),
            Color32::BLACK,
        );
        painter.text(
            Pos2::new(full.left() + 8.0, area.top() - 14.0),
            Align2::LEFT_CENTER,
            self.plot.y_label,
            label_font.clone(),
            Color32::BLACK,
        );

        // Decade grid on the log axis
        let scale = self.plot.y_scale;
        painter.text(
            Pos2::new(full.left() + 8.0, area.bottom() + 22.0),
            Align2::LEFT_CENTER,
            format!("{:.0e}..{:.0e} ns", scale.min(), scale.max()),
            FontId::proportional(11.0),
            Color32::GRAY,
        );
        for exp in scale.decades() {
            let Some(v) = scale.unit(10f64.powi(exp)) else {
                continue;
            };
            let y = to_screen(0.0, v).y;
            painter.line_segment([Pos2::new(area.left(), y), Pos2::new(area.right(), y)], grid);
            painter.text(
                Pos2::new(area.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format!("1e{}", exp),
                label_font.clone(),
                Color32::DARK_GRAY,
            );
        }

        // Integer trial ticks
        let x_max = self.plot.x_max.round() as usize;
        let step = (x_max / 10).max(1);
        for t in (0..=x_max).step_by(step) {
            let x = to_screen(t as f64 / self.plot.x_max, 0.0).x;
            painter.line_segment([Pos2::new(x, area.bottom()), Pos2::new(x, area.bottom() + 4.0)], axis);
            painter.text(
                Pos2::new(x, area.bottom() + 6.0),
                Align2::CENTER_TOP,
                t.to_string(),
                label_font.clone(),
                Color32::DARK_GRAY,
            );
        }

        painter.line_segment([area.left_bottom(), area.right_bottom()], axis);
        painter.line_segment([area.left_bottom(), area.left_top()], axis);

        // Points, then legend
        for (i, series) in self.plot.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            for &(x, y) in &series.points {
                if let Some((u, v)) = self.plot.project(x, y) {
                    painter.circle_filled(to_screen(u, v), POINT_RADIUS, color);
                }
            }

            let row = Pos2::new(area.right() + 20.0, area.top() + 10.0 + 20.0 * i as f32);
            painter.circle_filled(row, POINT_RADIUS, color);
            painter.text(
                Pos2::new(row.x + 10.0, row.y),
                Align2::LEFT_CENTER,
                &series.name,
                label_font.clone(),
                Color32::BLACK,
            );
        }
    }
}

impl eframe::App for TimesPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.paint(ui));
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let path = resolve_record_path();
    let record = TimingRecord::load(&path)
        .with_context(|| format!("failed to load timing record from {:?}", path))?;

    for (name, mean) in record.means() {
        println!("Mean time for {}: {} ns", name, mean);
    }

    let plot = ScatterPlot::from_record(&record);
    let title = plot.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(TimesPlotterApp::new(plot)))),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
