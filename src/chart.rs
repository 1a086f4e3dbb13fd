use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::wide::WideTable;
use crate::format::{format_percent, format_value};

// ---------------------------------------------------------------------------
// Secondary axis emulation
// ---------------------------------------------------------------------------

/// egui_plot has a single y scale, so percentage series are drawn in
/// primary-axis coordinates through this linear map and the right-hand axis
/// labels invert it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    pub offset: f64,
    pub scale: f64,
}

impl AxisMapping {
    pub const IDENTITY: AxisMapping = AxisMapping {
        offset: 0.0,
        scale: 1.0,
    };

    /// Map the `secondary` value range onto the `primary` one.
    pub fn between(secondary: (f64, f64), primary: (f64, f64)) -> Self {
        let span = |(lo, hi): (f64, f64)| {
            if hi > lo {
                hi - lo
            } else {
                hi.abs().max(1.0)
            }
        };
        let scale = span(primary) / span(secondary);
        AxisMapping {
            offset: primary.0 - secondary.0 * scale,
            scale,
        }
    }

    pub fn to_primary(&self, value: f64) -> f64 {
        self.offset + value * self.scale
    }

    pub fn to_secondary(&self, y: f64) -> f64 {
        (y - self.offset) / self.scale
    }
}

fn value_range<'a>(values: impl Iterator<Item = &'a Option<f64>>) -> Option<(f64, f64)> {
    values.flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left, absolute values.
    Primary,
    /// Right, percentages.
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLabel {
    pub x: f64,
    /// In primary-axis coordinates.
    pub y: f64,
    pub text: String,
}

/// One series, ready to hand to egui_plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub axis: Axis,
    pub color: Color32,
    /// Runs of consecutive present values; missing values split runs.
    pub segments: Vec<Vec<[f64; 2]>>,
    pub labels: Vec<PointLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub traces: Vec<Trace>,
    pub mapping: AxisMapping,
}

impl ChartModel {
    pub fn from_wide(wide: &WideTable) -> Self {
        let primary = value_range(
            wide.columns
                .iter()
                .filter(|c| !c.is_percentage)
                .flat_map(|c| c.values.iter()),
        );
        let secondary = value_range(
            wide.columns
                .iter()
                .filter(|c| c.is_percentage)
                .flat_map(|c| c.values.iter()),
        );
        let mapping = match (secondary, primary) {
            (Some(s), Some(p)) => AxisMapping::between(s, p),
            _ => AxisMapping::IDENTITY,
        };

        let colors = ColorMap::new(wide.columns.iter().map(|c| c.label.as_str()));

        let traces = wide
            .columns
            .iter()
            .map(|col| {
                let axis = if col.is_percentage {
                    Axis::Secondary
                } else {
                    Axis::Primary
                };
                let project = |v: f64| match axis {
                    Axis::Secondary => mapping.to_primary(v),
                    Axis::Primary => v,
                };

                let labels = wide
                    .years
                    .iter()
                    .zip(&col.values)
                    .filter_map(|(&year, v)| {
                        let v = (*v)?;
                        let text = if col.is_percentage {
                            format_percent(v)
                        } else {
                            format_value(v)
                        };
                        Some(PointLabel {
                            x: year as f64,
                            y: project(v),
                            text,
                        })
                    })
                    .collect();

                let projected: Vec<Option<f64>> =
                    col.values.iter().map(|v| v.map(project)).collect();

                Trace {
                    label: col.label.clone(),
                    axis,
                    color: colors.color_for(&col.label),
                    segments: segments(&wide.years, &projected),
                    labels,
                }
            })
            .collect();

        ChartModel { traces, mapping }
    }

    pub fn has_primary(&self) -> bool {
        self.traces.iter().any(|t| t.axis == Axis::Primary)
    }

    pub fn has_secondary(&self) -> bool {
        self.traces.iter().any(|t| t.axis == Axis::Secondary)
    }

    /// Tooltip for a hovered plot point. Percentage traces report the
    /// unmapped percentage rather than the plotted coordinate.
    pub fn hover_text(&self, name: &str, x: f64, y: f64) -> String {
        let year = x.round() as i64;
        match self.traces.iter().find(|t| t.label == name) {
            Some(trace) if trace.axis == Axis::Secondary => format!(
                "{name}\nYear: {year}\nPercent: {}",
                format_percent(self.mapping.to_secondary(y))
            ),
            Some(_) => format!("{name}\nYear: {year}\nValue: {}", format_value(y)),
            None => String::new(),
        }
    }
}

/// Split a series into runs of present values so gaps are not interpolated.
pub fn segments(years: &[i32], values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (&year, value) in years.iter().zip(values) {
        match value {
            Some(v) => current.push([year as f64, *v]),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::Series;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn gaps_split_segments() {
        let runs = segments(
            &[2019, 2020, 2021, 2022, 2023],
            &[Some(1.0), Some(2.0), None, Some(4.0), None],
        );
        assert_eq!(
            runs,
            vec![vec![[2019.0, 1.0], [2020.0, 2.0]], vec![[2022.0, 4.0]]]
        );
        assert!(segments(&[2020], &[None]).is_empty());
    }

    #[test]
    fn mapping_spans_primary_range_and_inverts() {
        let m = AxisMapping::between((5.0, 25.0), (100.0, 500.0));
        assert!(close(m.to_primary(5.0), 100.0));
        assert!(close(m.to_primary(25.0), 500.0));
        assert!(close(m.to_secondary(m.to_primary(12.5)), 12.5));
    }

    #[test]
    fn degenerate_ranges_do_not_divide_by_zero() {
        let m = AxisMapping::between((50.0, 50.0), (100.0, 100.0));
        assert!(m.scale.is_finite());
        assert!(close(m.to_secondary(m.to_primary(50.0)), 50.0));
    }

    fn wide() -> WideTable {
        WideTable::assemble([
            Series::from_values(
                "StateA - GDP".into(),
                vec![(2020, Some(100.0)), (2021, Some(200.0))],
            ),
            Series::from_values(
                "StateA - Rate".into(),
                vec![(2020, Some(0.5)), (2021, Some(0.6))],
            ),
        ])
    }

    #[test]
    fn percentage_traces_use_secondary_axis() {
        let chart = ChartModel::from_wide(&wide());
        assert!(chart.has_secondary());

        let gdp = &chart.traces[0];
        assert_eq!(gdp.axis, Axis::Primary);
        assert_eq!(gdp.labels[0].text, "100");
        assert_eq!(gdp.segments, vec![vec![[2020.0, 100.0], [2021.0, 200.0]]]);

        let rate = &chart.traces[1];
        assert_eq!(rate.axis, Axis::Secondary);
        assert_eq!(rate.labels[0].text, "50%");
        assert_eq!(rate.labels[1].text, "60%");
        // 50% sits at the bottom of the primary range, 60% at the top
        assert!(close(rate.segments[0][0][1], 100.0));
        assert!(close(rate.segments[0][1][1], 200.0));
        assert_ne!(gdp.color, rate.color);
    }

    #[test]
    fn hover_reports_percentages_not_plot_coordinates() {
        let chart = ChartModel::from_wide(&wide());
        // the 50% point is drawn at y = 100 on the shared scale
        assert_eq!(
            chart.hover_text("StateA - Rate", 2020.0, 100.0),
            "StateA - Rate\nYear: 2020\nPercent: 50%"
        );
        assert_eq!(
            chart.hover_text("StateA - GDP", 2021.0, 200.0),
            "StateA - GDP\nYear: 2021\nValue: 200"
        );
        assert!(chart.hover_text("", 2020.0, 1.0).is_empty());
    }

    #[test]
    fn only_percentages_keep_identity_mapping() {
        let wide = WideTable::assemble([Series::from_values(
            "SP - Taxa".into(),
            vec![(2020, Some(0.1)), (2021, None)],
        )]);
        let chart = ChartModel::from_wide(&wide);
        assert_eq!(chart.mapping, AxisMapping::IDENTITY);
        assert!(!chart.has_primary());
        assert_eq!(chart.traces[0].labels.len(), 1);
        assert_eq!(chart.traces[0].labels[0].text, "10%");
    }
}
