// Integration tests: per-image metrics of two segmentation models

mod utils;

use corrosion_severity::comparison::{
    compare, compare_all, ComparisonConfig, EffectMagnitude, MetricPair, VarianceAssumption,
};
use corrosion_severity::config::EngineConfig;
use corrosion_severity::error::ComparisonError;
use std::collections::BTreeMap;
use utils::init_tracing;

/// Per-image scores on a 12-image test split
fn evaluation() -> BTreeMap<String, MetricPair> {
    let mut metrics = BTreeMap::new();
    metrics.insert(
        "iou".to_string(),
        MetricPair::new(
            vec![0.62, 0.58, 0.66, 0.61, 0.59, 0.64, 0.60, 0.63, 0.57, 0.65, 0.62, 0.60],
            vec![0.71, 0.69, 0.74, 0.70, 0.68, 0.73, 0.72, 0.70, 0.67, 0.75, 0.71, 0.69],
        ),
    );
    metrics.insert(
        "precision".to_string(),
        MetricPair::new(
            vec![0.81, 0.79, 0.84, 0.80, 0.82, 0.78, 0.83, 0.80, 0.81, 0.79, 0.82, 0.80],
            vec![0.80, 0.82, 0.79, 0.83, 0.81, 0.80, 0.78, 0.84, 0.81, 0.80, 0.79, 0.82],
        ),
    );
    // Only one evaluation run was exported for the baseline
    metrics.insert(
        "dice".to_string(),
        MetricPair::new(vec![0.74], vec![0.80, 0.82, 0.81]),
    );
    metrics
}

#[test]
fn test_compare_all_end_to_end() {
    init_tracing();

    let batch = compare_all(&evaluation(), &ComparisonConfig::default());

    assert_eq!(batch.outcomes.len(), 3);
    assert_eq!(batch.success_count(), 2);
    assert_eq!(batch.failure_count(), 1);

    let iou = batch.get("iou").unwrap().as_ref().unwrap();
    assert!(iou.significant);
    assert!(iou.candidate_is_better());
    assert_eq!(iou.effect_magnitude(), EffectMagnitude::Large);
    assert!((iou.mean_difference - (iou.stats_b.mean - iou.stats_a.mean)).abs() < 1e-12);

    let precision = batch.get("precision").unwrap().as_ref().unwrap();
    assert!(!precision.significant);
    assert!(precision.p_value > 0.5);

    assert!(matches!(
        batch.get("dice").unwrap(),
        Err(ComparisonError::InsufficientSample {
            sample: "baseline",
            actual: 1,
            ..
        })
    ));

    assert_eq!(batch.significant_metrics(), vec!["iou"]);
}

#[test]
fn test_confidence_intervals_contain_means() {
    let batch = compare_all(&evaluation(), &ComparisonConfig::default());
    for result in batch.results() {
        for stats in [&result.stats_a, &result.stats_b] {
            let ci = stats.confidence_interval;
            assert!(ci.lower < stats.mean && stats.mean < ci.upper);
            assert_eq!(ci.level, 0.95);
            assert!(stats.min <= stats.median && stats.median <= stats.max);
        }
    }
}

#[test]
fn test_engine_config_drives_comparison() {
    let config = EngineConfig::from_toml_str(
        r#"
        [labeling.scheme]
        thresholds = [8.0, 11.0]

        [comparison]
        confidence_level = 0.99
        variance = "pooled"
        "#,
    )
    .unwrap();

    let batch = compare_all(&evaluation(), &config.comparison);
    let iou = batch.get("iou").unwrap().as_ref().unwrap();

    assert_eq!(iou.variance, VarianceAssumption::Pooled);
    assert_eq!(iou.confidence_level, 0.99);
    assert!((iou.degrees_of_freedom - 22.0).abs() < 1e-4);
    assert!(iou.significant);
}

#[test]
fn test_report_and_json_export() {
    let batch = compare_all(&evaluation(), &ComparisonConfig::default());

    let report = batch.to_report_string();
    assert!(report.contains("SIGNIFICANT DIFFERENCE (1 metrics)"));
    assert!(report.contains("iou: "));
    assert!(report.contains("- dice: Insufficient data"));

    let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
    assert_eq!(json["outcomes"]["iou"]["Ok"]["significant"], true);
    assert_eq!(json["outcomes"]["precision"]["Ok"]["significant"], false);
}

#[test]
fn test_single_metric_matches_batch() {
    let metrics = evaluation();
    let pair = &metrics["iou"];
    let config = ComparisonConfig::permissive();

    let single = compare("iou", &pair.baseline, &pair.candidate, &config).unwrap();
    let batch = compare_all(&metrics, &config);
    assert_eq!(batch.get("iou").unwrap().as_ref().unwrap(), &single);
}
