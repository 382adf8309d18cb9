use chrono::Utc;
use colored::*;
use fleetdash_common::models::{DashboardStats, Identity};
use fleetdash_core::services::DashboardService;

use crate::commands::App;
use crate::mprint;
use crate::terminal::{format, print, spinner};

pub async fn dashboard(app: &App) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let service: DashboardService = DashboardService::new(&app.repos);
    let stats: DashboardStats =
        spinner::run("Loading dashboard...", service.stats(&identity, Utc::now())).await?;

    let q: u8 = app.cfg.quiet;
    print::header("dashboard", q);

    if q >= 2 {
        mprint!(&format!(
            "{} {} {} {} {:.2} {:.1}",
            stats.total_vehicles,
            stats.available_vehicles,
            stats.active_bookings,
            stats.total_customers,
            stats.monthly_revenue,
            stats.utilization_rate
        ));
        return Ok(());
    }

    let rows: Vec<format::Detail> = counters(&stats);
    let keys: Vec<&str> = rows.iter().map(|(key, _)| key.as_str()).collect();
    print::align_keys(&keys);
    for (key, value) in rows {
        print::aligned_line(&key, value);
    }
    Ok(())
}

/// Every counter, zeros included, so an empty project still shows the full board.
fn counters(stats: &DashboardStats) -> Vec<format::Detail> {
    vec![
        ("Total vehicles".to_string(), stats.total_vehicles.to_string().bold()),
        ("Available".to_string(), stats.available_vehicles.to_string().green()),
        ("Active bookings".to_string(), stats.active_bookings.to_string().bold()),
        ("Customers".to_string(), stats.total_customers.to_string().bold()),
        ("Revenue (month)".to_string(), format::money(stats.monthly_revenue)),
        ("Utilization".to_string(), format::percent(stats.utilization_rate)),
    ]
}
