//! Chart documents handed to the plotting front end.
//!
//! Each chart bundles the engine's series with the labels and colours needed
//! to draw them. One document is written per chart.

use crate::display::{
    algo_color, signal_color, LineStyle, LEGACY_COLOR, SIGNAL_Y_RANGE, THRESHOLD_COLOR,
    WINDOW_MARKER_COLOR, X_LABEL,
};
use myr_config::Deployment;
use myr_core::series::{difficulty_name, legacy_name, share_name, signal_name};
use myr_core::{
    algo_difficulty_series, algo_share_series, block_window_axis, signal_series,
    signal_series_by_algo, Algo, BlockDataset, Series, SeriesSet, StatsResult, WindowParams,
};
use serde::Serialize;

/// One drawn line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Legend label
    pub label: String,
    /// Line colour
    pub color: String,
    /// Dash pattern
    pub style: LineStyle,
    /// Data
    #[serde(flatten)]
    pub series: Series,
}

/// One subplot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Y-axis label of the subplot, if it differs from the chart's
    pub label: Option<String>,
    /// Lines in drawing order
    pub lines: Vec<Line>,
}

/// A complete chart document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Stable identifier, also the output file stem
    pub id: &'static str,
    /// Chart title
    pub title: &'static str,
    /// X-axis label
    pub x_label: &'static str,
    /// Y-axis label
    pub y_label: &'static str,
    /// Visible height range
    pub x_range: Option<[i64; 2]>,
    /// Visible value range
    pub y_range: Option<[f64; 2]>,
    /// Subplots, top to bottom
    pub panels: Vec<Panel>,
}

impl Chart {
    /// Output file name for this chart
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }

    /// Total number of lines across all panels
    pub fn line_count(&self) -> usize {
        self.panels.iter().map(|p| p.lines.len()).sum()
    }
}

fn line(set: &SeriesSet, name: &str, label: impl Into<String>, color: &str, style: LineStyle) -> Option<Line> {
    set.get(name).map(|series| Line {
        label: label.into(),
        color: color.to_string(),
        style,
        series: series.clone(),
    })
}

fn x_range(dataset: &BlockDataset, params: &WindowParams) -> StatsResult<Option<[i64; 2]>> {
    let axis = block_window_axis(&dataset.heights(), params.block_window(), params.block_domain())?;
    Ok(match (axis.first(), axis.last()) {
        (Some(&first), Some(&last)) => Some([first, last]),
        _ => None,
    })
}

/// Block share of every algorithm on one panel
pub fn algo_share_chart(dataset: &BlockDataset, params: &WindowParams) -> StatsResult<Chart> {
    let set = algo_share_series(dataset, params)?;
    let lines = Algo::ALL
        .iter()
        .filter_map(|&algo| {
            line(&set, &share_name(algo), algo.as_str(), algo_color(algo), LineStyle::Solid)
        })
        .collect();

    Ok(Chart {
        id: "algohist",
        title: "Block % for Mining Algorithms",
        x_label: X_LABEL,
        y_label: "% of Blocks",
        x_range: x_range(dataset, params)?,
        y_range: None,
        panels: vec![Panel { label: None, lines }],
    })
}

/// Difficulty with one panel per algorithm
pub fn difficulty_chart(dataset: &BlockDataset, params: &WindowParams) -> StatsResult<Chart> {
    let set = algo_difficulty_series(dataset)?;
    let panels = Algo::ALL
        .iter()
        .map(|&algo| Panel {
            label: Some(algo.to_string()),
            lines: line(&set, &difficulty_name(algo), algo.as_str(), algo_color(algo), LineStyle::Solid)
                .into_iter()
                .collect(),
        })
        .collect();

    Ok(Chart {
        id: "diffhist",
        title: "Mining Difficulty",
        x_label: X_LABEL,
        y_label: "Difficulty",
        x_range: x_range(dataset, params)?,
        y_range: None,
        panels,
    })
}

/// Signaling percentages with one panel per algorithm
pub fn algo_signal_chart(
    dataset: &BlockDataset,
    params: &WindowParams,
    deployments: &[Deployment],
) -> StatsResult<Chart> {
    let bits: Vec<u32> = deployments.iter().map(|d| d.bit).collect();
    let set = signal_series_by_algo(dataset, params, &bits)?;

    let panels = Algo::ALL
        .iter()
        .map(|&algo| {
            let mut lines: Vec<Line> = line(
                &set,
                &legacy_name(Some(algo)),
                "Legacy Blocks",
                LEGACY_COLOR,
                LineStyle::Solid,
            )
            .into_iter()
            .collect();
            lines.extend(deployments.iter().filter_map(|d| {
                line(
                    &set,
                    &signal_name(d.bit, Some(algo)),
                    format!("{} Blocks", d.name),
                    signal_color(d.bit),
                    LineStyle::Solid,
                )
            }));
            Panel {
                label: Some(algo.to_string()),
                lines,
            }
        })
        .collect();

    Ok(Chart {
        id: "algoversionma",
        title: "Block Softfork %",
        x_label: X_LABEL,
        y_label: "%",
        x_range: x_range(dataset, params)?,
        y_range: Some(SIGNAL_Y_RANGE),
        panels,
    })
}

/// Signaling percentages across all blocks, with threshold and window marker
pub fn signal_chart(
    dataset: &BlockDataset,
    params: &WindowParams,
    deployments: &[Deployment],
) -> StatsResult<Chart> {
    let bits: Vec<u32> = deployments.iter().map(|d| d.bit).collect();
    let set = signal_series(dataset, params, &bits)?;

    let mut lines: Vec<Line> = line(&set, &legacy_name(None), "Legacy Blocks", LEGACY_COLOR, LineStyle::Solid)
        .into_iter()
        .collect();
    lines.extend(deployments.iter().filter_map(|d| {
        line(
            &set,
            &signal_name(d.bit, None),
            format!("{} Blocks", d.name),
            signal_color(d.bit),
            LineStyle::Solid,
        )
    }));
    lines.extend(line(
        &set,
        "activation_threshold",
        "BIP9 Activation Threshold",
        THRESHOLD_COLOR,
        LineStyle::DashDot,
    ));
    lines.extend(line(
        &set,
        "block_window_marker",
        "Block Window",
        WINDOW_MARKER_COLOR,
        LineStyle::DashDot,
    ));

    Ok(Chart {
        id: "versionma",
        title: "Block Softforks",
        x_label: X_LABEL,
        y_label: "%",
        x_range: x_range(dataset, params)?,
        y_range: Some(SIGNAL_Y_RANGE),
        panels: vec![Panel { label: None, lines }],
    })
}

/// Builds every chart in publishing order
pub fn build_charts(
    dataset: &BlockDataset,
    params: &WindowParams,
    deployments: &[Deployment],
) -> StatsResult<Vec<Chart>> {
    dataset.ensure_covers(params)?;
    Ok(vec![
        algo_share_chart(dataset, params)?,
        difficulty_chart(dataset, params)?,
        algo_signal_chart(dataset, params, deployments)?,
        signal_chart(dataset, params, deployments)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use myr_core::BlockRecord;

    fn dataset(len: usize) -> BlockDataset {
        let records = (0..len)
            .map(|i| BlockRecord {
                height: 5000 + i as i64,
                algo: Algo::ALL[i % 5],
                difficulty: 2.0 * i as f64,
                version: if i % 4 == 0 { 0x2000_0044 } else { 0x2000_0000 },
                size: 900,
                time: 1_600_000_000 + i as u64 * 60,
                tx_count: 3,
            })
            .collect();
        BlockDataset::new(records).unwrap()
    }

    fn deployments() -> Vec<Deployment> {
        vec![Deployment::new("legbit", 3), Deployment::new("argon2d", 7)]
    }

    #[test]
    fn test_build_all_charts() {
        let data = dataset(31);
        let params = WindowParams::new(10, 20).unwrap();
        let charts = build_charts(&data, &params, &deployments()).unwrap();

        let ids: Vec<_> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["algohist", "diffhist", "algoversionma", "versionma"]);
        for chart in &charts {
            assert_eq!(chart.x_range, Some([5010, 5030]));
        }

        assert_eq!(charts[0].line_count(), 5);
        assert_eq!(charts[1].panels.len(), 5);
        // legacy + two deployments per algo
        assert_eq!(charts[2].line_count(), 15);
        // legacy + two deployments + threshold + marker
        assert_eq!(charts[3].line_count(), 5);
    }

    #[test]
    fn test_signal_chart_lines() {
        let data = dataset(31);
        let params = WindowParams::new(10, 20).unwrap();
        let chart = signal_chart(&data, &params, &deployments()).unwrap();
        let lines = &chart.panels[0].lines;

        assert_eq!(lines[1].label, "legbit Blocks");
        assert_eq!(lines[1].color, "cyan");
        assert_eq!(lines[3].style, LineStyle::DashDot);
        assert_eq!(lines[4].series.name, "block_window_marker");
        assert_eq!(chart.y_range, Some(SIGNAL_Y_RANGE));
    }

    #[test]
    fn test_chart_json_shape() {
        let data = dataset(31);
        let params = WindowParams::new(10, 20).unwrap();
        let chart = algo_share_chart(&data, &params).unwrap();
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["id"], "algohist");
        let first = &json["panels"][0]["lines"][0];
        assert_eq!(first["label"], "sha256d");
        assert_eq!(first["color"], "#8ecf1d");
        assert_eq!(first["style"], "solid");
        assert_eq!(first["name"], "sha256d_share");
        assert_eq!(first["x"].as_array().unwrap().len(), 21);
        assert_eq!(chart.file_name(), "algohist.json");
    }

    #[test]
    fn test_short_dataset_rejected() {
        let data = dataset(10);
        let params = WindowParams::new(10, 20).unwrap();
        assert!(build_charts(&data, &params, &deployments()).is_err());
    }
}
