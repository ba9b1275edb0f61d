//! Engine Scenario Tests
//!
//! End-to-end checks of the windowed engines against small hand-built chains.

use myr_core::*;

fn alternating_chain(len: usize) -> BlockDataset {
    let records = (0..len)
        .map(|i| BlockRecord {
            height: 100 + i as i64,
            algo: if i % 2 == 0 { Algo::Sha256d } else { Algo::Scrypt },
            difficulty: 1000.0 + i as f64,
            version: if i % 3 == 0 { 0x2000_0004 } else { 0x0000_0002 },
            size: 500,
            time: 1_500_000_000 + 120 * i as u64,
            tx_count: 2,
        })
        .collect();
    BlockDataset::new(records).unwrap()
}

#[cfg(test)]
mod engine_tests {
    use super::*;

    /// Ten alternating blocks, window 2, domain 3
    #[test]
    fn test_alternating_share_scenario() {
        let data = alternating_chain(10);
        assert_eq!(data.heights(), (100..110).collect::<Vec<_>>());

        let pct = moving_average_pct(&data.algos(), &Algo::Sha256d, 2, 3).unwrap();
        assert_eq!(pct.len(), 4);
        assert!(pct.iter().all(|v| [0.0, 50.0, 100.0].contains(v)));
        assert_eq!(pct, vec![50.0, 50.0, 50.0, 50.0]);

        let axis = block_window_axis(&data.heights(), 2, 3).unwrap();
        assert_eq!(axis, vec![102, 103, 104, 105]);
    }

    /// Height window includes both the oldest and the target block
    #[test]
    fn test_inclusive_height_window() {
        let heights = [10i64, 11, 12, 13];
        let values = [0i64, 0, 0, 0];
        let pct = window_match_percentage(&heights, &values, 13, 3, &Criterion::Exact(0)).unwrap();
        assert_eq!(pct, 100.0);

        let values = [1i64, 0, 0, 0];
        let pct = window_match_percentage(&heights, &values, 13, 3, &Criterion::Exact(1)).unwrap();
        assert_eq!(pct, 25.0);
    }

    /// Per-algo windows are over same-algo blocks inside the height range
    #[test]
    fn test_per_algo_signal_percentage() {
        let data = alternating_chain(10);
        let params = WindowParams::new(2, 3).unwrap();

        let set = signal_series_by_algo(&data, &params, &[3]).unwrap();
        let sha = set.get("bit3_signal_pct_by_algo[sha256d]").unwrap();
        // sha256d blocks at i = 0,2,4,6,8; signaling where i % 3 == 0 -> 0 and 6
        assert_eq!(sha.x, vec![100, 102, 104, 106, 108]);
        assert_eq!(sha.y, vec![100.0, 50.0, 0.0, 50.0, 50.0]);

        let legacy = set.get("legacy_pct_by_algo[sha256d]").unwrap();
        let complement: Vec<f64> = sha.y.iter().map(|v| 100.0 - v).collect();
        assert_eq!(legacy.y, complement);
    }

    /// Global signal series covers every block
    #[test]
    fn test_global_signal_series() {
        let data = alternating_chain(10);
        let params = WindowParams::new(2, 3).unwrap();

        let set = signal_series(&data, &params, &[1, 3]).unwrap();
        let bit3 = set.get("bit3_signal_pct").unwrap();
        assert_eq!(bit3.len(), data.len());
        // version 4 = 0b100 has bit 3 only
        assert!(set.get("bit1_signal_pct").unwrap().y.iter().all(|&v| v == 0.0));

        let threshold = set.get("activation_threshold").unwrap();
        assert!(threshold.y.iter().all(|&v| v == ACTIVATION_THRESHOLD_PCT));

        let marker = set.get("block_window_marker").unwrap();
        assert_eq!(marker.x, vec![108, 108, 106, 106, 108]);
    }

    /// Share series needs the full look-back plus domain
    #[test]
    fn test_share_requires_full_history() {
        let data = alternating_chain(5);
        let params = WindowParams::new(2, 3).unwrap();
        let err = algo_share_series(&data, &params).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientHistory {
                required: 6,
                available: 5
            }
        );
    }

    /// Series serialize with their semantic names
    #[test]
    fn test_series_serialization() {
        let data = alternating_chain(10);
        let set = algo_difficulty_series(&data).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["name"], "sha256d_difficulty");
        assert_eq!(first["x"][0], 100);
    }
}
