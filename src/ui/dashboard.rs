use eframe::egui::{self, Color32, ProgressBar, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::data::aggregate::{DailyBucket, DashboardData};
use crate::format;
use crate::state::{AppState, Dashboard};

// ---------------------------------------------------------------------------
// Central panel – scorecards, gauge and charts
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let data = match &state.dashboard {
        Dashboard::NotLoaded => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open an order extract to start  (File → Open…)");
            });
            return;
        }
        Dashboard::NoResults => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No orders match the current filters.");
            });
            return;
        }
        // Cheap per-frame clone so the slider below can borrow state.
        Dashboard::Ready(data) => data.clone(),
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            scorecards(ui, &data);
            ui.add_space(8.0);
            target_gauge(ui, state, &data);
            ui.add_space(8.0);
            priority_chart(ui, state, &data);
            ui.add_space(8.0);
            daily_chart(ui, &data.daily);
        });
}

// ---------------------------------------------------------------------------
// Scorecards
// ---------------------------------------------------------------------------

fn scorecards(ui: &mut Ui, data: &DashboardData) {
    ui.heading("Key indicators");
    ui.columns(3, |cols: &mut [Ui]| {
        scorecard(&mut cols[0], "Orders", &format::grouped(data.orders as u64));
        scorecard(&mut cols[1], "Packages", &format::grouped(data.packages));
        scorecard(
            &mut cols[2],
            "Avg delivery time",
            &format::opt_duration(data.mean_delivery),
        );
    });
    ui.columns(3, |cols: &mut [Ui]| {
        scorecard(
            &mut cols[0],
            "Avg processing time",
            &format::opt_duration(data.mean_processing),
        );
        scorecard(
            &mut cols[1],
            "Avg last-mile time",
            &format::opt_duration(data.mean_last_mile),
        );
        scorecard(
            &mut cols[2],
            "Avg delay (late orders)",
            &format::opt_duration(data.mean_delay),
        );
    });
}

fn scorecard(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.label(RichText::new(value).size(22.0).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// On-time delivery target
// ---------------------------------------------------------------------------

fn target_gauge(ui: &mut Ui, state: &mut AppState, data: &DashboardData) {
    ui.heading("On-time delivery target");
    ui.add(
        egui::Slider::new(&mut state.target, 0.0..=1.0)
            .step_by(0.01)
            .text("Target: share of orders delivered on time"),
    );

    match data.on_time_rate {
        Some(rate) => {
            ui.add(ProgressBar::new(rate as f32).text(format::percent(rate)));
            let delta = rate - state.target;
            let (color, sign) = if delta >= 0.0 {
                (Color32::DARK_GREEN, "+")
            } else {
                (Color32::RED, "")
            };
            ui.label(
                RichText::new(format!(
                    "{sign}{:.2}% vs target of {}",
                    delta * 100.0,
                    format::percent(state.target)
                ))
                .color(color),
            );
        }
        None => {
            ui.label(format!("On-time rate: {}", format::NO_DATA));
        }
    }

    ui.label(format!(
        "Delivered before 13:00, per late order: {}",
        format::opt_percent(data.cutoff_ratio)
    ));
}

// ---------------------------------------------------------------------------
// Orders per priority
// ---------------------------------------------------------------------------

fn priority_chart(ui: &mut Ui, state: &AppState, data: &DashboardData) {
    ui.heading("Orders per priority");
    if data.by_priority.is_empty() {
        ui.label("No priority information in the filtered orders.");
        return;
    }

    let bars: Vec<Bar> = data
        .by_priority
        .iter()
        .enumerate()
        .map(|(i, (priority, n))| {
            Bar::new(i as f64, *n as f64)
                .width(0.6)
                .name(priority)
                .fill(state.priority_colors.color_for(priority))
        })
        .collect();

    let labels: Vec<String> = data.by_priority.iter().map(|(p, _)| p.clone()).collect();

    Plot::new("priority_chart")
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 0.25 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .y_axis_label("Orders")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Daily traffic (weight bars + order-count line)
// ---------------------------------------------------------------------------

fn daily_chart(ui: &mut Ui, daily: &[DailyBucket]) {
    ui.heading("Declared weight and orders per day");
    if daily.is_empty() {
        ui.label("No last-event dates in the filtered orders.");
        return;
    }

    let day_x = |day: chrono::NaiveDate| -> f64 { f64::from(chrono::Datelike::num_days_from_ce(&day)) };

    let max_weight = daily.iter().map(|b| b.total).fold(0.0_f64, f64::max);
    let max_orders = daily.iter().map(|b| b.orders).max().unwrap_or(0);
    // egui_plot has a single y-axis: the count line is scaled onto the
    // weight axis, legend carries the factor.
    let scale = if max_orders > 0 && max_weight > 0.0 {
        max_weight / max_orders as f64
    } else {
        1.0
    };

    let bars: Vec<Bar> = daily
        .iter()
        .map(|b| {
            Bar::new(day_x(b.day), b.total)
                .width(0.8)
                .name(b.day.format("%Y-%m-%d").to_string())
        })
        .collect();

    let points: PlotPoints = daily
        .iter()
        .map(|b| [day_x(b.day), b.orders as f64 * scale])
        .collect();

    Plot::new("daily_chart")
        .height(260.0)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(|mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            chrono::NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.format("%d %b").to_string())
                .unwrap_or_default()
        })
        .y_axis_label("Declared weight")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Declared weight")
                    .color(Color32::from_rgb(66, 133, 244)),
            );
            plot_ui.line(
                Line::new(points)
                    .name(format!("Orders (×{scale:.1} on weight axis)"))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
        });
}
