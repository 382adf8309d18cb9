#![cfg(test)]
use fleetdash_common::models::{BookingStatus, Identity, ProfilePatch};
use fleetdash_core::ServiceError;
use fleetdash_core::services::CustomerService;

use crate::support::{MemoryBackend, at, identity};

#[tokio::test]
async fn only_admins_list_and_delete_customers() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let customer: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    let service = CustomerService::new(&backend.repositories());

    assert_eq!(service.list(&admin).await.unwrap().len(), 2);
    assert!(matches!(
        service.list(&customer).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        service.delete(&customer, "admin").await,
        Err(ServiceError::Forbidden(_))
    ));

    service.delete(&admin, "u1").await.unwrap();
    assert_eq!(service.list(&admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn customers_see_only_themselves() {
    let backend = MemoryBackend::new();
    let ada: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    backend.add_profile("u2", "Bob", false).await;
    let service = CustomerService::new(&backend.repositories());

    assert_eq!(service.get(&ada, "u1").await.unwrap().id, "u1");
    assert!(matches!(
        service.get(&ada, "u2").await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        service.bookings_for(&ada, "u2").await,
        Err(ServiceError::Forbidden(_))
    ));
}

#[tokio::test]
async fn booking_history_belongs_to_the_customer() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    backend.add_profile("u1", "Ada", false).await;
    let car = backend.add_car("Toyota", "Camry", 45.0, true).await;
    backend
        .add_booking("u1", &car.id, at(2024, 5, 1), at(2024, 5, 3), Some(90.0), BookingStatus::Completed)
        .await;
    backend
        .add_booking("u2", &car.id, at(2024, 5, 4), at(2024, 5, 6), Some(90.0), BookingStatus::Pending)
        .await;
    let service = CustomerService::new(&backend.repositories());

    let history = service.bookings_for(&admin, "u1").await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].car_label(), "Toyota Camry");
}

#[tokio::test]
async fn admin_rights_are_granted_by_admins_only() {
    let backend = MemoryBackend::new();
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let ada: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    let service = CustomerService::new(&backend.repositories());
    let promote = ProfilePatch {
        is_admin: Some(true),
        ..ProfilePatch::default()
    };

    assert!(matches!(
        service.update(&ada, "u1", promote.clone()).await,
        Err(ServiceError::Forbidden(_))
    ));

    let promoted = service.update(&admin, "u1", promote).await.unwrap();
    assert!(promoted.is_admin);
    assert!(promoted.updated_at.is_some());
}
