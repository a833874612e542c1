//! Target progress service - core business logic
//!
//! Current values are always derived from stored sales facts. Nothing but
//! [`TargetService::recompute_progress`] writes them.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use fieldpulse_domain::{
    AchievementBand, FieldPulseError, NewTarget, Result, SalesResult, Target, TargetKind,
    TargetPatch, TargetSummary, TeamSummary,
};
use tracing::{debug, info, warn};

use super::ports::TargetRepository;
use crate::clock::Clock;
use crate::report::ports::SalesResultRepository;

/// Creates targets and keeps their progress in step with sales facts
pub struct TargetService {
    targets: Arc<dyn TargetRepository>,
    sales: Arc<dyn SalesResultRepository>,
    clock: Arc<dyn Clock>,
}

impl TargetService {
    /// Create a new target service
    pub fn new(
        targets: Arc<dyn TargetRepository>,
        sales: Arc<dyn SalesResultRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { targets, sales, clock }
    }

    /// Create a target, or return the existing one with the same id.
    ///
    /// # Errors
    /// `ValidationFailed` when the period ends before it starts or the target
    /// value is negative or not finite.
    pub fn create_target(&self, new_target: NewTarget) -> Result<Target> {
        let mut violations = Vec::new();
        if new_target.period_end < new_target.period_start {
            violations.push(format!(
                "period end {} is before period start {}",
                new_target.period_end, new_target.period_start
            ));
        }
        if !new_target.target_value.is_finite() || new_target.target_value < 0.0 {
            violations.push(format!(
                "target value {} must be a non-negative number",
                new_target.target_value
            ));
        }
        if !violations.is_empty() {
            warn!(owner_id = %new_target.owner_id, violations = ?violations, "Rejected target");
            return Err(FieldPulseError::ValidationFailed(violations));
        }

        let target = Target {
            target_id: new_target.target_id(),
            owner_id: new_target.owner_id,
            kind: new_target.kind,
            period_start: new_target.period_start,
            period_end: new_target.period_end,
            target_value: new_target.target_value,
            current_value: 0.0,
            product_id: new_target.product_id.filter(|p| !p.is_empty()),
            description: new_target.description,
            created_at: self.clock.now(),
            is_active: true,
        };
        let target_id = target.target_id.clone();

        let stored = self.targets.insert_target_if_absent(target)?;
        info!(target_id = %target_id, kind = %stored.kind, "Target ready");
        Ok(stored)
    }

    /// Apply the editable fields present in `patch`.
    ///
    /// Values that would break the target's invariants are dropped with a
    /// warning instead of failing the call.
    pub fn update_target(&self, target_id: &str, patch: TargetPatch) -> Result<Target> {
        let mut target = self.require(target_id)?;
        let TargetPatch { target_value, description, period_end } = patch;

        match target_value {
            Some(value) if value.is_finite() && value >= 0.0 => target.target_value = value,
            Some(value) => warn!(target_id, value, "Ignored invalid target value"),
            None => {}
        }
        if let Some(description) = description {
            target.description = description;
        }
        match period_end {
            Some(end) if end >= target.period_start => target.period_end = end,
            Some(end) => warn!(target_id, %end, "Ignored period end before period start"),
            None => {}
        }

        self.targets.save_target(&target)?;
        info!(target_id, "Target updated");
        Ok(target)
    }

    /// Mark a target inactive. Deactivating twice is not an error.
    pub fn deactivate_target(&self, target_id: &str) -> Result<Target> {
        let mut target = self.require(target_id)?;
        if target.is_active {
            target.is_active = false;
            self.targets.save_target(&target)?;
            info!(target_id, "Target deactivated");
        }
        Ok(target)
    }

    /// All targets of an owner, newest first.
    pub fn user_targets(&self, owner_id: &str, active_only: bool) -> Result<Vec<Target>> {
        let mut targets = self.targets.targets_for_owner(owner_id)?;
        if active_only {
            targets.retain(|t| t.is_active);
        }
        targets.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| a.target_id.cmp(&b.target_id))
        });
        Ok(targets)
    }

    /// Active targets whose period contains today.
    pub fn current_targets(&self, owner_id: &str) -> Result<Vec<Target>> {
        let today = self.clock.today();
        let mut targets = self.targets.targets_for_owner(owner_id)?;
        targets.retain(|t| t.is_active && t.covers(today));
        targets.sort_by(|a, b| a.target_id.cmp(&b.target_id));
        Ok(targets)
    }

    /// Recompute current values of the owner's current targets from sales
    /// facts. Returns how many targets changed.
    pub fn recompute_progress(&self, owner_id: &str) -> Result<usize> {
        let mut updated = 0;
        for mut target in self.current_targets(owner_id)? {
            let value = self.measure(&target)?;
            if value != target.current_value {
                debug!(
                    target_id = %target.target_id,
                    old = target.current_value,
                    new = value,
                    "Target progress changed"
                );
                target.current_value = value;
                self.targets.save_target(&target)?;
                updated += 1;
            }
        }

        info!(owner_id, updated, "Target progress recomputed");
        Ok(updated)
    }

    /// Achievement rate of one target, in percent.
    pub fn achievement_rate(&self, target_id: &str) -> Result<f64> {
        Ok(self.require(target_id)?.achievement_rate())
    }

    /// Band counts, per-kind counts and mean rate over current targets.
    pub fn target_summary(&self, owner_id: &str) -> Result<TargetSummary> {
        Ok(summarize(&self.current_targets(owner_id)?))
    }

    /// Per-member summaries plus per-kind team totals and rates.
    pub fn team_summary(&self, team_id: &str, member_ids: &[String]) -> Result<TeamSummary> {
        let mut members_summary = BTreeMap::new();
        let mut team_totals: BTreeMap<TargetKind, f64> = BTreeMap::new();
        let mut team_targets: BTreeMap<TargetKind, f64> = BTreeMap::new();

        for member_id in member_ids {
            let targets = self.current_targets(member_id)?;
            for target in &targets {
                *team_totals.entry(target.kind).or_default() += target.current_value;
                *team_targets.entry(target.kind).or_default() += target.target_value;
            }
            members_summary.insert(member_id.clone(), summarize(&targets));
        }

        let team_achievement_rates = team_targets
            .iter()
            .map(|(kind, &target_total)| {
                let current_total = team_totals.get(kind).copied().unwrap_or_default();
                let rate =
                    if target_total > 0.0 { current_total / target_total * 100.0 } else { 0.0 };
                (*kind, rate)
            })
            .collect();

        Ok(TeamSummary {
            team_id: team_id.to_string(),
            total_members: member_ids.len(),
            members_summary,
            team_totals,
            team_targets,
            team_achievement_rates,
        })
    }

    fn require(&self, target_id: &str) -> Result<Target> {
        self.targets
            .get_target(target_id)?
            .ok_or_else(|| FieldPulseError::NotFound(format!("target {target_id}")))
    }

    fn measure(&self, target: &Target) -> Result<f64> {
        let in_period: Vec<SalesResult> = self
            .sales
            .sales_between(&target.owner_id, target.period_start, target.period_end)?
            .into_iter()
            .filter(|sale| matches_product(target, sale))
            .collect();

        let value = match target.kind {
            TargetKind::SalesAmount => in_period.iter().map(|s| s.total_amount as f64).sum(),
            TargetKind::Profit => in_period.iter().map(|s| s.profit_amount as f64).sum(),
            TargetKind::Quantity => in_period.iter().map(|s| s.quantity as f64).sum(),
            TargetKind::NewCustomer => {
                let known: HashSet<String> = self
                    .sales
                    .sales_before(&target.owner_id, target.period_start)?
                    .into_iter()
                    .map(|sale| sale.customer_id)
                    .collect();
                new_customer_count(&in_period, &known) as f64
            }
        };
        Ok(value)
    }
}

fn matches_product(target: &Target, sale: &SalesResult) -> bool {
    target.product_id.as_deref().map_or(true, |product| sale.product_id == product)
}

/// Distinct customers in `sales` not present in `known`.
fn new_customer_count(sales: &[SalesResult], known: &HashSet<String>) -> usize {
    sales
        .iter()
        .map(|sale| sale.customer_id.as_str())
        .filter(|customer| !customer.is_empty() && !known.contains(*customer))
        .collect::<HashSet<_>>()
        .len()
}

fn summarize(targets: &[Target]) -> TargetSummary {
    let mut summary = TargetSummary { total_targets: targets.len(), ..TargetSummary::default() };
    let mut rate_total = 0.0;

    for target in targets {
        let rate = target.achievement_rate();
        rate_total += rate;
        match AchievementBand::from_rate(rate) {
            AchievementBand::Achieved => summary.achieved_targets += 1,
            AchievementBand::OnTrack => summary.on_track_targets += 1,
            AchievementBand::Behind => summary.behind_targets += 1,
            AchievementBand::Critical => summary.critical_targets += 1,
        }
        *summary.targets_by_kind.entry(target.kind).or_default() += 1;
    }

    if !targets.is_empty() {
        summary.average_achievement_rate = rate_total / targets.len() as f64;
    }
    summary
}
