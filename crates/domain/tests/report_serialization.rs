//! Wire-format checks for records exposed to callers

use chrono::NaiveDate;
use fieldpulse_domain::{
    ActivityEntry, Alert, AlertCategory, DailyReport, ReportStatus, TargetKind, TargetSummary,
};

#[test]
fn report_round_trips_through_json() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 26).unwrap();
    let mut report = DailyReport::draft("u001", date);
    report.activities.push(ActivityEntry::new("customer visit").at("09:00"));
    report.travel_expense = 1_500;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "draft");
    assert_eq!(json["report_date"], "2024-03-26");
    assert!(json.get("submitted_at").is_none());

    let back: DailyReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.status, ReportStatus::Draft);
}

#[test]
fn summary_keys_are_kind_names() {
    let mut summary = TargetSummary::default();
    summary.targets_by_kind.insert(TargetKind::NewCustomer, 2);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["targets_by_kind"]["new_customer"], 2);
}

#[test]
fn alert_serializes_category_and_level() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 26).unwrap();
    let alert = Alert {
        alert_id: Alert::id_for(AlertCategory::TargetDeadline, "tgt_1", date),
        owner_id: "u001".into(),
        category: AlertCategory::TargetDeadline,
        level: AlertCategory::TargetDeadline.level(),
        title: "Target deadline approaching".into(),
        message: "2 days left".into(),
        target_id: Some("tgt_1".into()),
        report_id: None,
        generated_on: date,
        expires_on: None,
    };

    let json = serde_json::to_value(&alert).unwrap();
    assert_eq!(json["category"], "target_deadline");
    assert_eq!(json["level"], "info");
}
