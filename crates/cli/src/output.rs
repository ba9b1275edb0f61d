//! Writing chart documents to the output directory.

use crate::charts::Chart;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each chart as `<id>.json` under `dir`, creating it if needed.
/// Returns the written paths in chart order.
pub fn write_charts(dir: &Path, charts: &[Chart]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = dir.join(chart.file_name());
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, chart)
            .with_context(|| format!("failed to serialize chart {}", chart.id))?;
        writer
            .flush()
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(chart = chart.id, lines = chart.line_count(), path = %path.display(), "chart written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Panel;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directory_and_files() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("charts");
        let chart = Chart {
            id: "versionma",
            title: "Block Softforks",
            x_label: "Block Number",
            y_label: "%",
            x_range: None,
            y_range: None,
            panels: vec![Panel {
                label: None,
                lines: vec![],
            }],
        };

        let paths = write_charts(&target, &[chart]).unwrap();
        assert_eq!(paths, vec![target.join("versionma.json")]);

        let content = fs::read_to_string(&paths[0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["title"], "Block Softforks");
    }
}
