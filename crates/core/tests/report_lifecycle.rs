//! Report lifecycle behaviour through `ReportService`

mod support;

use chrono::{Duration, NaiveDate};
use fieldpulse_core::Clock;
use fieldpulse_domain::{
    ActivityEntry, FieldPulseError, ReportPatch, ReportStatus, SalesResult, Visit,
};
use support::{date, Harness};

fn today() -> NaiveDate {
    date(2024, 3, 26)
}

fn ready_report(h: &Harness) -> String {
    let report = h.reports.create_report("u001", today()).unwrap();
    h.reports
        .update_report(
            &report.report_id,
            ReportPatch::new().activities(vec![ActivityEntry::new("customer visit").at("10:00")]),
        )
        .unwrap();
    report.report_id
}

#[test]
fn create_is_idempotent_and_keeps_edits() {
    let h = Harness::on(today());
    let first = h.reports.create_report("u001", today()).unwrap();
    assert_eq!(first.report_id, "rpt_u001_20240326");

    h.reports
        .update_report(&first.report_id, ReportPatch::new().challenges("price pressure"))
        .unwrap();

    let second = h.reports.create_report("u001", today()).unwrap();
    assert_eq!(second.report_id, first.report_id);
    assert_eq!(second.challenges, "price pressure");
}

#[test]
fn update_unknown_report_is_not_found() {
    let h = Harness::on(today());
    let err = h.reports.update_report("rpt_nobody_20240326", ReportPatch::new()).unwrap_err();
    assert!(matches!(err, FieldPulseError::NotFound(_)));
}

#[test]
fn malformed_working_hours_are_filtered() {
    let h = Harness::on(today());
    let report = h.reports.create_report("u001", today()).unwrap();

    let updated = h
        .reports
        .update_report(
            &report.report_id,
            ReportPatch::new().working_hours(f64::NAN).travel_expense(800),
        )
        .unwrap();
    assert!((updated.working_hours - 8.0).abs() < f64::EPSILON);
    assert_eq!(updated.travel_expense, 800);

    let updated = h
        .reports
        .update_report(&report.report_id, ReportPatch::new().working_hours(-1.0))
        .unwrap();
    assert!((updated.working_hours - 8.0).abs() < f64::EPSILON);
}

#[test]
fn submission_collects_every_violation() {
    let h = Harness::on(today());
    let report = h.reports.create_report("u001", today()).unwrap();
    h.reports.update_report(&report.report_id, ReportPatch::new().working_hours(0.0)).unwrap();

    let err = h.reports.submit_report(&report.report_id).unwrap_err();
    assert_eq!(err.reasons().len(), 2);
    assert_eq!(h.store.report(&report.report_id).unwrap().status, ReportStatus::Draft);
}

#[test]
fn submission_rejects_out_of_range_hours() {
    let h = Harness::on(today());
    let report_id = ready_report(&h);

    for hours in [0.0, 25.0] {
        h.reports.update_report(&report_id, ReportPatch::new().working_hours(hours)).unwrap();
        let err = h.reports.submit_report(&report_id).unwrap_err();
        assert!(matches!(err, FieldPulseError::ValidationFailed(ref r) if r.len() == 1));
    }

    h.reports.update_report(&report_id, ReportPatch::new().working_hours(8.0)).unwrap();
    let submitted = h.reports.submit_report(&report_id).unwrap();
    assert_eq!(submitted.status, ReportStatus::Submitted);
    assert!(submitted.submitted_at.is_some());
}

#[test]
fn submit_twice_is_invalid_state() {
    let h = Harness::on(today());
    let report_id = ready_report(&h);
    h.reports.submit_report(&report_id).unwrap();

    let err = h.reports.submit_report(&report_id).unwrap_err();
    assert!(matches!(err, FieldPulseError::InvalidState(_)));
}

#[test]
fn approval_requires_submission_and_happens_once() {
    let h = Harness::on(today());
    let report_id = ready_report(&h);

    let err = h.reports.approve_report(&report_id, "m001").unwrap_err();
    assert!(matches!(err, FieldPulseError::InvalidState(_)));

    h.reports.submit_report(&report_id).unwrap();
    let approved = h.reports.approve_report(&report_id, "m001").unwrap();
    assert_eq!(approved.status, ReportStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("m001"));
    assert!(approved.approved_at.is_some());

    let err = h.reports.approve_report(&report_id, "m002").unwrap_err();
    assert!(matches!(err, FieldPulseError::InvalidState(_)));
    assert_eq!(h.store.report(&report_id).unwrap().approved_by.as_deref(), Some("m001"));
}

#[test]
fn approved_report_is_immutable() {
    let h = Harness::on(today());
    let report_id = ready_report(&h);
    h.reports.submit_report(&report_id).unwrap();
    let approved = h.reports.approve_report(&report_id, "m001").unwrap();
    let writes = h.store.write_count();

    let err = h
        .reports
        .update_report(&report_id, ReportPatch::new().challenges("rewritten").working_hours(2.0))
        .unwrap_err();

    assert!(matches!(err, FieldPulseError::InvalidState(_)));
    assert_eq!(h.store.report(&report_id).unwrap(), approved);
    assert_eq!(h.store.write_count(), writes);
}

#[test]
fn list_is_inclusive_and_newest_first() {
    let h = Harness::on(today());
    for day in [20, 22, 25, 26] {
        h.reports.create_report("u001", date(2024, 3, day)).unwrap();
    }
    h.reports.create_report("u002", date(2024, 3, 22)).unwrap();

    let listed = h.reports.list_reports("u001", date(2024, 3, 22), date(2024, 3, 25)).unwrap();
    let dates: Vec<_> = listed.iter().map(|r| r.report_date).collect();
    assert_eq!(dates, vec![date(2024, 3, 25), date(2024, 3, 22)]);
}

#[test]
fn facts_attach_only_to_existing_reports() {
    let h = Harness::on(today());
    let sale = SalesResult::new("u001", "c001", "p001", 1, 59_800, date(2024, 3, 25));
    h.reports.record_sales_result(sale).unwrap();

    let late = h.reports.create_report("u001", date(2024, 3, 25)).unwrap();
    assert!(late.sales_results.is_empty());
    assert_eq!(h.store.sales_count(), 1);

    let report = h.reports.create_report("u001", today()).unwrap();
    let visited_at = today().and_hms_opt(14, 30, 0).unwrap();
    let visit = Visit::new("u001", "c002", visited_at, "product demo").with_outcome("positive");
    h.reports.record_visit(visit).unwrap();
    h.reports
        .record_sales_result(SalesResult::new("u001", "c002", "p002", 2, 59_800, today()))
        .unwrap();

    let report = h.store.report(&report.report_id).unwrap();
    assert_eq!(report.visits.len(), 1);
    assert_eq!(report.visits[0].time, "14:30");
    assert_eq!(report.visits[0].outcome, "positive");
    assert_eq!(report.sales_results.len(), 1);
    assert_eq!(report.sales_results[0].amount, 119_600);
    assert_eq!(h.store.visit_count(), 1);

    let visits = h.reports.list_visits("u001", today(), today()).unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].customer_id, "c002");
}

#[test]
fn recording_the_same_sale_twice_keeps_one_summary_line() {
    let h = Harness::on(today());
    let report = h.reports.create_report("u001", today()).unwrap();
    let sale = SalesResult::new("u001", "c001", "p001", 1, 59_800, today()).with_id("sr001");

    h.reports.record_sales_result(sale.clone()).unwrap();
    h.reports.record_sales_result(sale).unwrap();

    let stored = h.store.report(&report.report_id).unwrap();
    assert_eq!(stored.sales_results.len(), 1);
    assert_eq!(h.store.sales_count(), 1);
    assert_eq!(h.reports.report_statistics("u001", 7).unwrap().total_sales, 1);
}

#[test]
fn recording_the_same_visit_twice_keeps_one_summary_line() {
    let h = Harness::on(today());
    let report = h.reports.create_report("u001", today()).unwrap();
    let visited_at = today().and_hms_opt(10, 0, 0).unwrap();
    let visit = Visit::new("u001", "c001", visited_at, "proposal").with_id("v001");

    h.reports.record_visit(visit.clone()).unwrap();
    h.reports.record_visit(visit).unwrap();

    let stored = h.store.report(&report.report_id).unwrap();
    assert_eq!(stored.visits.len(), 1);
    assert_eq!(h.store.visit_count(), 1);
    assert_eq!(h.reports.report_statistics("u001", 7).unwrap().total_visits, 1);
}

#[test]
fn statistics_cover_window_and_rate() {
    let h = Harness::on(today());
    let empty = h.reports.report_statistics("u001", 30).unwrap();
    assert_eq!(empty.total_reports, 0);
    assert_eq!(empty.submission_rate, 0.0);

    let report_id = ready_report(&h);
    h.reports.update_report(&report_id, ReportPatch::new().travel_expense(1_200)).unwrap();
    h.reports.submit_report(&report_id).unwrap();
    h.reports.create_report("u001", date(2024, 3, 20)).unwrap();
    h.reports.create_report("u001", date(2024, 1, 1)).unwrap();

    let stats = h.reports.report_statistics("u001", 30).unwrap();
    assert_eq!(stats.window_start, date(2024, 2, 25));
    assert_eq!(stats.total_reports, 2);
    assert_eq!(stats.submitted_reports, 1);
    assert_eq!(stats.approved_reports, 0);
    assert!((stats.total_working_hours - 16.0).abs() < f64::EPSILON);
    assert_eq!(stats.total_travel_expense, 1_200);
    assert!((stats.submission_rate - 50.0).abs() < f64::EPSILON);
}

#[test]
fn pending_approvals_in_submission_order() {
    let h = Harness::on(today());
    for owner in ["u002", "u001"] {
        let report = h.reports.create_report(owner, today()).unwrap();
        h.reports
            .update_report(
                &report.report_id,
                ReportPatch::new().activities(vec![ActivityEntry::new("office work")]),
            )
            .unwrap();
        h.reports.submit_report(&report.report_id).unwrap();
        h.clock.set(h.clock.now() + Duration::minutes(5));
    }

    let pending = h.reports.pending_approvals().unwrap();
    let owners: Vec<_> = pending.iter().map(|r| r.owner_id.as_str()).collect();
    assert_eq!(owners, vec!["u002", "u001"]);
}

#[test]
fn csv_export_has_header_and_rows() {
    let h = Harness::on(today());
    let report_id = ready_report(&h);
    h.reports.update_report(&report_id, ReportPatch::new().travel_expense(500)).unwrap();
    h.reports.create_report("u001", date(2024, 3, 25)).unwrap();

    let csv = h.reports.export_reports_csv("u001", date(2024, 3, 1), today()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "date,working_hours,visits,sales,travel_expense,status");
    assert_eq!(lines[1], "2024-03-26,8,0,0,500,draft");
    assert_eq!(lines[2], "2024-03-25,8,0,0,0,draft");
    assert_eq!(lines.len(), 3);
}
