use chrono::{DateTime, Months, Utc};
use colored::*;
use fleetdash_common::models::{BookingStatus, Identity};
use fleetdash_common::models::report::{BookingTrends, FleetUtilization, RevenueReport};
use fleetdash_common::models::stats::start_of_month;
use fleetdash_core::services::ReportService;

use crate::commands::{App, ReportCommand};
use crate::mprint;
use crate::terminal::{format, print, spinner};

pub async fn run(app: &App, cmd: ReportCommand) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let service: ReportService = ReportService::new(&app.repos);

    match cmd {
        ReportCommand::Revenue { from, to } => {
            let now: DateTime<Utc> = Utc::now();
            let from: DateTime<Utc> = from.unwrap_or_else(|| start_of_month(now));
            let to: DateTime<Utc> = to.unwrap_or(now);
            let report: RevenueReport =
                spinner::run("Building revenue report...", service.revenue(&identity, from, to))
                    .await?;
            print_revenue(&report, app.cfg.quiet);
        }
        ReportCommand::Utilization => {
            let fleet: FleetUtilization =
                spinner::run("Measuring fleet...", service.utilization(&identity)).await?;
            print_utilization(&fleet, app.cfg.quiet);
        }
        ReportCommand::Trends { from, to, by } => {
            let now: DateTime<Utc> = Utc::now();
            let to: DateTime<Utc> = to.unwrap_or(now);
            let from: DateTime<Utc> = from.unwrap_or_else(|| default_trend_start(to));
            let trends: BookingTrends = spinner::run(
                "Counting bookings...",
                service.trends(&identity, from, to, by),
            )
            .await?;
            print_trends(&trends, app.cfg.quiet);
        }
    }
    Ok(())
}

fn print_revenue(report: &RevenueReport, q: u8) {
    print::header("revenue", q);
    print::align_keys(&["Window", "Bookings", "Revenue", "Average"]);
    print::aligned_line("Window", format::date_range(&report.from, &report.to));
    print::aligned_line("Bookings", report.bookings.to_string().bold());
    print::aligned_line("Revenue", format::money(report.total_revenue));
    print::aligned_line("Average", format::money(report.average_booking_value()));

    if report.by_status.is_empty() {
        return;
    }

    mprint!();
    print::header("by status", q);
    let statuses: Vec<format::Detail> = report
        .by_status
        .iter()
        .map(|(status, count)| (status.to_string(), count.to_string().normal()))
        .collect();
    print::tree_head(0, "Statuses");
    print::as_tree_one_level(statuses);

    mprint!();
    print::header("by vehicle", q);
    for (idx, car) in report.by_car.iter().enumerate() {
        print::tree_head(idx, &car.label);
        print::as_tree_one_level(vec![
            ("Bookings".to_string(), car.bookings.to_string().normal()),
            ("Revenue".to_string(), format::money(car.revenue)),
        ]);
    }
}

fn print_utilization(fleet: &FleetUtilization, q: u8) {
    print::header("fleet utilization", q);
    print::align_keys(&["Vehicles", "Available", "Rented", "Utilization", "Avg rate"]);
    print::aligned_line("Vehicles", fleet.total.to_string().bold());
    print::aligned_line("Available", fleet.available.to_string().green());
    print::aligned_line("Rented", fleet.rented.to_string().yellow());
    print::aligned_line("Utilization", format::percent(fleet.utilization_rate));
    print::aligned_line("Avg rate", format::money(fleet.average_daily_rate));
}

/// Start of the month five months before `to`, giving six monthly buckets.
fn default_trend_start(to: DateTime<Utc>) -> DateTime<Utc> {
    let month: DateTime<Utc> = start_of_month(to);
    month.checked_sub_months(Months::new(5)).unwrap_or(month)
}

fn print_trends(trends: &BookingTrends, q: u8) {
    print::header(&format!("bookings per {}", trends.period), q);

    if trends.total() == 0 {
        print::no_results();
        return;
    }

    if q >= 2 {
        for bucket in &trends.buckets {
            mprint!(&format!("{} {}", trends.period.label(&bucket.start), bucket.total));
        }
        return;
    }

    for (idx, bucket) in trends.buckets.iter().enumerate() {
        print::tree_head(idx, &trends.period.label(&bucket.start));
        let mut rows: Vec<format::Detail> =
            vec![("Bookings".to_string(), bucket.total.to_string().bold())];
        rows.extend(
            BookingStatus::ALL
                .into_iter()
                .filter(|status| bucket.count(*status) > 0)
                .map(|status| (status.to_string(), bucket.count(status).to_string().normal())),
        );
        print::as_tree_one_level(rows);
    }

    let busiest: String = trends
        .busiest()
        .map(|b| trends.period.label(&b.start))
        .unwrap_or_default();
    print::summary(&format!(
        "{} bookings, busiest {} {}",
        trends.total().to_string().bold().green(),
        trends.period,
        busiest.bold().yellow()
    ));
}
