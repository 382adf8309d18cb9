#![cfg(test)]
use chrono::{DateTime, Duration, Utc};
use fleetdash_common::models::{BookingStatus, DashboardStats, Identity};
use fleetdash_core::ServiceError;
use fleetdash_core::services::DashboardService;

use crate::support::{MemoryBackend, at, identity};

#[tokio::test]
async fn stats_cover_fleet_bookings_customers_and_revenue() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    backend.add_profile("u1", "Ada", false).await;
    let camry = backend.add_car("Toyota", "Camry", 45.0, false).await;
    let civic = backend.add_car("Honda", "Civic", 30.0, true).await;
    backend.add_car("Ford", "Focus", 35.0, true).await;

    let now: DateTime<Utc> = at(2024, 5, 15) + Duration::hours(12);
    // last month, still counts as active but not towards this month's revenue
    backend
        .add_booking("u1", &camry.id, at(2024, 4, 28), at(2024, 5, 20), Some(400.0), BookingStatus::Active)
        .await;
    backend
        .add_booking("u1", &civic.id, at(2024, 5, 2), at(2024, 5, 4), Some(60.0), BookingStatus::Completed)
        .await;
    backend
        .add_booking("u1", &civic.id, at(2024, 5, 20), at(2024, 5, 22), None, BookingStatus::Pending)
        .await;
    backend
        .add_booking("u1", &camry.id, at(2024, 5, 25), at(2024, 5, 27), Some(90.0), BookingStatus::Cancelled)
        .await;

    let stats: DashboardStats = DashboardService::new(&backend.repositories())
        .stats(&admin, now)
        .await
        .unwrap();

    assert_eq!(stats.total_vehicles, 3);
    assert_eq!(stats.available_vehicles, 2);
    assert_eq!(stats.active_bookings, 2);
    assert_eq!(stats.total_customers, 2);
    assert_eq!(stats.monthly_revenue, 150.0);
    assert_eq!(stats.utilization_rate, 33.3);
}

#[tokio::test]
async fn empty_project_reports_zero_counters() {
    let backend = MemoryBackend::new();
    let viewer: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    backend.state.lock().await.profiles.clear();

    let stats: DashboardStats = DashboardService::new(&backend.repositories())
        .stats(&viewer, at(2024, 5, 15))
        .await
        .unwrap();

    assert_eq!(stats, DashboardStats::default());
}

#[tokio::test]
async fn one_failing_query_fails_the_refresh() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    backend.add_car("Toyota", "Camry", 45.0, true).await;
    backend.state.lock().await.fail_bookings = true;

    let result = DashboardService::new(&backend.repositories())
        .stats(&admin, at(2024, 5, 15))
        .await;

    assert!(matches!(result, Err(ServiceError::Backend(_))));
}
