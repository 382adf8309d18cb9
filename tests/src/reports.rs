#![cfg(test)]
use fleetdash_common::models::report::{BookingTrends, FleetUtilization, RevenueReport, TrendPeriod};
use fleetdash_common::models::{BookingStatus, Identity};
use fleetdash_core::ServiceError;
use fleetdash_core::services::ReportService;

use crate::support::{MemoryBackend, at, identity};

#[tokio::test]
async fn revenue_groups_by_car_and_skips_cancellations() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let camry = backend.add_car("Toyota", "Camry", 45.0, true).await;
    let civic = backend.add_car("Honda", "Civic", 30.0, true).await;
    backend
        .add_booking("u1", &camry.id, at(2024, 5, 1), at(2024, 5, 3), Some(90.0), BookingStatus::Completed)
        .await;
    backend
        .add_booking("u1", &camry.id, at(2024, 5, 10), at(2024, 5, 12), Some(90.0), BookingStatus::Active)
        .await;
    backend
        .add_booking("u2", &civic.id, at(2024, 5, 5), at(2024, 5, 7), Some(60.0), BookingStatus::Confirmed)
        .await;
    backend
        .add_booking("u2", &civic.id, at(2024, 5, 8), at(2024, 5, 9), Some(30.0), BookingStatus::Cancelled)
        .await;
    backend
        .add_booking("u2", &civic.id, at(2024, 6, 1), at(2024, 6, 2), Some(30.0), BookingStatus::Pending)
        .await;

    let report: RevenueReport = ReportService::new(&backend.repositories())
        .revenue(&admin, at(2024, 5, 1), at(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(report.bookings, 3);
    assert_eq!(report.total_revenue, 240.0);
    assert_eq!(report.average_booking_value(), 80.0);
    assert_eq!(report.by_status.get(&BookingStatus::Cancelled), Some(&1));
    assert_eq!(report.by_status.get(&BookingStatus::Pending), None);
    assert_eq!(report.by_car[0].car_id, camry.id);
    assert_eq!(report.by_car[0].revenue, 180.0);
    assert_eq!(report.by_car[1].revenue, 60.0);
}

#[tokio::test]
async fn reports_reject_inverted_windows_and_customers() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let ada: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    let service = ReportService::new(&backend.repositories());

    assert!(matches!(
        service.revenue(&admin, at(2024, 6, 1), at(2024, 5, 1)).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        service.revenue(&ada, at(2024, 5, 1), at(2024, 6, 1)).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        service.utilization(&ada).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .trends(&ada, at(2024, 5, 1), at(2024, 6, 1), TrendPeriod::Day)
            .await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .trends(&admin, at(2024, 5, 1), at(2024, 5, 1), TrendPeriod::Month)
            .await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn trends_count_bookings_per_month_and_status() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let camry = backend.add_car("Toyota", "Camry", 45.0, true).await;
    backend
        .add_booking("u1", &camry.id, at(2024, 3, 30), at(2024, 4, 2), None, BookingStatus::Completed)
        .await;
    backend
        .add_booking("u1", &camry.id, at(2024, 4, 3), at(2024, 4, 5), None, BookingStatus::Completed)
        .await;
    backend
        .add_booking("u2", &camry.id, at(2024, 4, 9), at(2024, 4, 10), None, BookingStatus::Cancelled)
        .await;
    backend
        .add_booking("u2", &camry.id, at(2024, 6, 1), at(2024, 6, 3), None, BookingStatus::Confirmed)
        .await;

    let trends: BookingTrends = ReportService::new(&backend.repositories())
        .trends(&admin, at(2024, 4, 1), at(2024, 7, 1), TrendPeriod::Month)
        .await
        .unwrap();

    let totals: Vec<usize> = trends.buckets.iter().map(|b| b.total).collect();
    assert_eq!(totals, vec![2, 0, 1]);
    assert_eq!(trends.buckets[0].count(BookingStatus::Cancelled), 1);
    assert_eq!(trends.buckets[0].count(BookingStatus::Completed), 1);
    assert_eq!(trends.buckets[2].count(BookingStatus::Confirmed), 1);
    assert_eq!(trends.total(), 3);
}

#[tokio::test]
async fn utilization_reflects_rented_cars() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    backend.add_car("Toyota", "Camry", 40.0, false).await;
    backend.add_car("Honda", "Civic", 20.0, true).await;

    let fleet: FleetUtilization = ReportService::new(&backend.repositories())
        .utilization(&admin)
        .await
        .unwrap();

    assert_eq!(fleet.rented, 1);
    assert_eq!(fleet.utilization_rate, 50.0);
    assert_eq!(fleet.average_daily_rate, 30.0);
}
