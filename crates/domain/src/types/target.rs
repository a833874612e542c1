//! Performance target types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ACHIEVED_RATE, LOW_ACHIEVEMENT_RATE, ON_TRACK_RATE};
use crate::impl_domain_status_conversions;

/// What a target measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    SalesAmount,
    Profit,
    Quantity,
    NewCustomer,
}

impl_domain_status_conversions!(TargetKind {
    SalesAmount => "sales_amount",
    Profit => "profit",
    Quantity => "quantity",
    NewCustomer => "new_customer",
});

impl TargetKind {
    pub const ALL: [Self; 4] = [Self::SalesAmount, Self::Profit, Self::Quantity, Self::NewCustomer];
}

/// Period-bound target for one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub target_id: String,
    pub owner_id: String,
    pub kind: TargetKind,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub target_value: f64,
    /// Derived from sales facts; only progress recomputation writes it
    #[serde(default)]
    pub current_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Target {
    /// Deterministic id: owner, kind, period start and optional product scope.
    pub fn id_for(
        owner_id: &str,
        kind: TargetKind,
        period_start: NaiveDate,
        product_id: Option<&str>,
    ) -> String {
        let base = format!("tgt_{}_{}_{}", owner_id, kind, period_start.format("%Y%m%d"));
        match product_id {
            Some(product) if !product.is_empty() => format!("{base}_{product}"),
            _ => base,
        }
    }

    /// Whether `date` falls inside the inclusive period.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }

    /// Signed number of days from `today` until the period ends.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.period_end - today).num_days()
    }

    /// `current / target * 100`, treating a zero target as all-or-nothing.
    pub fn achievement_rate(&self) -> f64 {
        if self.target_value == 0.0 {
            return if self.current_value > 0.0 { 100.0 } else { 0.0 };
        }
        self.current_value / self.target_value * 100.0
    }
}

/// Input for target creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTarget {
    pub owner_id: String,
    pub kind: TargetKind,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub target_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl NewTarget {
    pub fn new(
        owner_id: impl Into<String>,
        kind: TargetKind,
        period_start: NaiveDate,
        period_end: NaiveDate,
        target_value: f64,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            kind,
            period_start,
            period_end,
            target_value,
            product_id: None,
            description: String::new(),
        }
    }

    pub fn for_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn target_id(&self) -> String {
        Target::id_for(&self.owner_id, self.kind, self.period_start, self.product_id.as_deref())
    }
}

/// Partial update for a target; only these fields are editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
}

impl TargetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_value(mut self, value: f64) -> Self {
        self.target_value = Some(value);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn period_end(mut self, period_end: NaiveDate) -> Self {
        self.period_end = Some(period_end);
        self
    }
}

/// Achievement bucket used by summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementBand {
    /// 100% or more
    Achieved,
    /// 80% up to 100%
    OnTrack,
    /// 50% up to 80%
    Behind,
    /// below 50%
    Critical,
}

impl AchievementBand {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= ACHIEVED_RATE {
            Self::Achieved
        } else if rate >= ON_TRACK_RATE {
            Self::OnTrack
        } else if rate >= LOW_ACHIEVEMENT_RATE {
            Self::Behind
        } else {
            Self::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target(target_value: f64, current_value: f64) -> Target {
        Target {
            target_id: "tgt".into(),
            owner_id: "u001".into(),
            kind: TargetKind::SalesAmount,
            period_start: date(2024, 3, 1),
            period_end: date(2024, 3, 31),
            target_value,
            current_value,
            product_id: None,
            description: String::new(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    #[test]
    fn target_id_includes_product_scope() {
        let start = date(2024, 3, 1);
        assert_eq!(
            Target::id_for("u001", TargetKind::SalesAmount, start, None),
            "tgt_u001_sales_amount_20240301"
        );
        assert_eq!(
            Target::id_for("u001", TargetKind::Quantity, start, Some("p001")),
            "tgt_u001_quantity_20240301_p001"
        );
    }

    #[test]
    fn achievement_rate_handles_zero_target() {
        assert_eq!(target(0.0, 0.0).achievement_rate(), 0.0);
        assert_eq!(target(0.0, 5.0).achievement_rate(), 100.0);
        assert_eq!(target(100.0, 50.0).achievement_rate(), 50.0);
    }

    #[test]
    fn period_coverage_is_inclusive() {
        let t = target(1.0, 0.0);
        assert!(t.covers(date(2024, 3, 1)));
        assert!(t.covers(date(2024, 3, 31)));
        assert!(!t.covers(date(2024, 4, 1)));
        assert_eq!(t.days_left(date(2024, 4, 1)), -1);
    }

    #[test]
    fn bands_split_at_thresholds() {
        assert_eq!(AchievementBand::from_rate(100.0), AchievementBand::Achieved);
        assert_eq!(AchievementBand::from_rate(99.999), AchievementBand::OnTrack);
        assert_eq!(AchievementBand::from_rate(80.0), AchievementBand::OnTrack);
        assert_eq!(AchievementBand::from_rate(79.999), AchievementBand::Behind);
        assert_eq!(AchievementBand::from_rate(50.0), AchievementBand::Behind);
        assert_eq!(AchievementBand::from_rate(49.9), AchievementBand::Critical);
    }
}
