// Plain-text rendering of comparison results

use super::config::VarianceAssumption;
use super::engine::{BatchComparison, ComparisonResult, EffectMagnitude};

impl ComparisonResult {
    /// One-line summary, e.g.
    /// `iou: 0.8200 -> 0.8900 (Δ=+0.0700, p=0.0001, d=4.43 large) *`
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {:.4} -> {:.4} (Δ={:+.4}, p={:.4}, d={:.2} {}){}",
            self.metric_name,
            self.stats_a.mean,
            self.stats_b.mean,
            self.mean_difference,
            self.p_value,
            self.effect_size,
            magnitude_label(self.effect_magnitude()),
            if self.significant { " *" } else { "" }
        )
    }
}

impl BatchComparison {
    /// Human-readable report of all metrics
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        let significant = self.significant_metrics();
        if significant.is_empty() {
            report.push_str("✅ NO SIGNIFICANT DIFFERENCE\n\n");
        } else {
            report.push_str(&format!(
                "📈 SIGNIFICANT DIFFERENCE ({} metrics)\n\n",
                significant.len()
            ));
            report.push_str(&format!("Significant metrics: {}\n", significant.join(", ")));
        }

        report.push_str(&format!(
            "Test: {} (confidence level {}%)\n",
            match self.config.variance {
                VarianceAssumption::Welch => "Welch's t-test",
                VarianceAssumption::Pooled => "Student's pooled t-test",
            },
            self.config.confidence_level * 100.0
        ));
        report.push_str("Direction: candidate (B) minus baseline (A)\n");

        if self.success_count() > 0 {
            report.push_str("\n📊 Comparisons:\n");
            for result in self.results() {
                report.push_str(&format!("  {}\n", result.summary_line()));
            }
        }

        if self.failure_count() > 0 {
            report.push_str(&format!(
                "\n⚠️  Failed metrics ({}):\n",
                self.failure_count()
            ));
            for (name, error) in self.failures() {
                report.push_str(&format!("  - {}: {}\n", name, error));
            }
        }

        report
    }
}

fn magnitude_label(magnitude: EffectMagnitude) -> &'static str {
    match magnitude {
        EffectMagnitude::Negligible => "negligible",
        EffectMagnitude::Small => "small",
        EffectMagnitude::Medium => "medium",
        EffectMagnitude::Large => "large",
    }
}
