use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{AxisHints, HPlacement, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::chart::{Axis, ChartModel};
use crate::format::format_value;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// Show a hint instead of the chart when there is nothing to plot.
/// Returns whether the chart and table should be drawn.
pub fn has_content(ui: &mut Ui, state: &AppState) -> bool {
    let hint = match (&state.table, &state.load_error) {
        (None, Some(err)) => RichText::new(err).color(Color32::RED),
        (None, None) => RichText::new("Open a spreadsheet to start  (File → Open…)"),
        (Some(_), _) if state.wide.is_empty() => {
            RichText::new("Choose an entity and a variable on the left.")
        }
        (Some(_), _) => return true,
    };
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(hint);
    });
    false
}

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the legend row and the dual-axis line chart.
pub fn series_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = &state.chart;
    legend_row(ui, chart);

    let mapping = chart.mapping;
    let mut y_axes = Vec::new();
    if chart.has_primary() {
        y_axes.push(
            AxisHints::new_y()
                .label("Absolute values")
                .formatter(|mark, _range| format_value(mark.value)),
        );
    }
    if chart.has_secondary() {
        y_axes.push(
            AxisHints::new_y()
                .label("Percent (%)")
                .placement(HPlacement::Right)
                .formatter(move |mark, _range| {
                    format!("{}%", format_value(mapping.to_secondary(mark.value)))
                }),
        );
    }

    Plot::new("series_plot")
        .height(height)
        .label_formatter(|name, point| chart.hover_text(name, point.x, point.y))
        .x_axis_label("Year")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .custom_y_axes(y_axes)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &chart.traces {
                let style = match trace.axis {
                    Axis::Primary => LineStyle::Solid,
                    Axis::Secondary => LineStyle::dashed_loose(),
                };

                for segment in &trace.segments {
                    let line = Line::new(PlotPoints::from(segment.clone()))
                        .name(&trace.label)
                        .color(trace.color)
                        .style(style)
                        .width(2.0);
                    plot_ui.line(line);
                }

                // Markers keep isolated values visible between gaps.
                let markers: Vec<[f64; 2]> = trace.segments.iter().flatten().copied().collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(markers))
                        .name(&trace.label)
                        .color(trace.color)
                        .radius(3.0),
                );

                for label in &trace.labels {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(label.x, label.y),
                            RichText::new(&label.text).size(11.0).color(trace.color),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}

/// Legend above the plot area: colour swatch, line style and label per series.
fn legend_row(ui: &mut Ui, chart: &ChartModel) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for trace in &chart.traces {
            let (swatch, suffix) = match trace.axis {
                Axis::Primary => ("━━", ""),
                Axis::Secondary => ("╍╍", " (%)"),
            };
            ui.label(RichText::new(swatch).color(trace.color).strong());
            ui.label(format!("{}{suffix}", trace.label));
            ui.add_space(12.0);
        }
    });
}
