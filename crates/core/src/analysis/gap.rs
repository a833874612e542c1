//! Gap analyzer
//!
//! Projects what each current target still needs: the remaining gap and the
//! pace per remaining day that would close it.

use std::sync::Arc;

use chrono::NaiveDate;
use fieldpulse_domain::{GapAnalysis, GapMetrics, Result, Target, TargetGap, TargetKind};
use tracing::debug;

use crate::clock::Clock;
use crate::target::TargetService;

/// Rates below this count as behind schedule in the metrics
const BEHIND_SCHEDULE_RATE: f64 = 80.0;
const SIGNIFICANTLY_BEHIND_RATE: f64 = 50.0;
const ACHIEVED_RATE: f64 = 100.0;

/// Compares target progress against elapsed period time
pub struct GapAnalyzer {
    targets: Arc<TargetService>,
    clock: Arc<dyn Clock>,
}

impl GapAnalyzer {
    /// Create a gap analyzer over the given target service
    pub fn new(targets: Arc<TargetService>, clock: Arc<dyn Clock>) -> Self {
        Self { targets, clock }
    }

    /// Gap analysis over the owner's current targets as of today.
    pub fn analyze(&self, owner_id: &str) -> Result<GapAnalysis> {
        let targets = self.targets.current_targets(owner_id)?;
        let analysis = analyze_targets(owner_id, &targets, self.clock.today());
        debug!(owner_id, targets = analysis.gaps.len(), "Gap analysis generated");
        Ok(analysis)
    }
}

/// Gap of a single target on `today`.
pub fn target_gap(target: &Target, today: NaiveDate) -> TargetGap {
    let gap_amount = target.target_value - target.current_value;
    let days_left = target.days_left(today);
    let daily_required = if gap_amount > 0.0 { gap_amount / days_left.max(1) as f64 } else { 0.0 };

    TargetGap {
        target_id: target.target_id.clone(),
        kind: target.kind,
        target_value: target.target_value,
        current_value: target.current_value,
        gap_amount,
        achievement_rate: target.achievement_rate(),
        days_left,
        daily_required,
    }
}

/// Build the full analysis for a set of targets.
pub fn analyze_targets(owner_id: &str, targets: &[Target], today: NaiveDate) -> GapAnalysis {
    let gaps: Vec<TargetGap> = targets.iter().map(|t| target_gap(t, today)).collect();

    let insights = gaps.iter().filter_map(insight).collect();
    let recommendations = gaps.iter().filter_map(recommendation).collect();

    let mut metrics = GapMetrics { total_targets: gaps.len(), ..GapMetrics::default() };
    if !gaps.is_empty() {
        metrics.average_achievement_rate =
            gaps.iter().map(|g| g.achievement_rate).sum::<f64>() / gaps.len() as f64;
        metrics.targets_behind_schedule =
            gaps.iter().filter(|g| g.achievement_rate < BEHIND_SCHEDULE_RATE).count();
    }

    GapAnalysis {
        analysis_id: GapAnalysis::id_for(owner_id, today),
        owner_id: owner_id.to_string(),
        generated_on: today,
        gaps,
        insights,
        recommendations,
        metrics,
    }
}

fn insight(gap: &TargetGap) -> Option<String> {
    if gap.achievement_rate < SIGNIFICANTLY_BEHIND_RATE {
        Some(format!(
            "{} target is significantly behind ({:.1}%)",
            gap.kind, gap.achievement_rate
        ))
    } else if gap.achievement_rate > ACHIEVED_RATE {
        Some(format!("{} target achieved ({:.1}%)", gap.kind, gap.achievement_rate))
    } else {
        None
    }
}

fn recommendation(gap: &TargetGap) -> Option<String> {
    if gap.gap_amount <= 0.0 || gap.days_left <= 0 {
        return None;
    }

    let pace = gap.daily_required;
    let text = match gap.kind {
        TargetKind::SalesAmount => format!("Sell {pace:.0} per day to reach the sales target"),
        TargetKind::Profit => format!("Earn {pace:.0} profit per day to reach the profit target"),
        TargetKind::Quantity => format!("Sell {pace:.1} units per day to reach the quantity target"),
        TargetKind::NewCustomer => {
            format!("Win {pace:.1} new customers per day to reach the acquisition target")
        }
    };
    Some(text)
}
