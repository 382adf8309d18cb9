#![cfg(test)]
use fleetdash_common::BackendError;
use fleetdash_common::models::{Car, CarPatch, NewCar};
use fleetdash_core::ServiceError;
use fleetdash_core::services::VehicleService;

use crate::support::MemoryBackend;

fn corolla() -> NewCar {
    NewCar {
        make: "Toyota".into(),
        model: "Corolla".into(),
        year: 2023,
        license_plate: "KA-204".into(),
        daily_rate: 42.0,
        is_available: true,
        image_url: None,
    }
}

#[tokio::test]
async fn available_listing_skips_rented_cars() {
    let backend = MemoryBackend::new();
    let yaris: Car = backend.add_car("Toyota", "Yaris", 30.0, true).await;
    backend.add_car("Skoda", "Octavia", 55.0, false).await;
    let golf: Car = backend.add_car("VW", "Golf", 48.0, true).await;
    let service = VehicleService::new(&backend.repositories());

    assert_eq!(service.list().await.unwrap().len(), 3);

    let available: Vec<String> = service
        .list_available()
        .await
        .unwrap()
        .into_iter()
        .map(|car| car.id)
        .collect();
    assert_eq!(available, vec![golf.id, yaris.id]);
}

#[tokio::test]
async fn created_car_can_be_read_changed_and_removed() {
    let backend = MemoryBackend::new();
    let service = VehicleService::new(&backend.repositories());

    let created: Car = service.create(&corolla()).await.unwrap();
    assert_eq!(service.get(&created.id).await.unwrap().license_plate, "KA-204");

    let patch = CarPatch {
        daily_rate: Some(39.5),
        ..CarPatch::default()
    };
    let updated: Car = service.update(&created.id, &patch).await.unwrap();
    assert_eq!(updated.daily_rate, 39.5);
    assert_eq!(updated.model, "Corolla");

    service.delete(&created.id).await.unwrap();
    assert!(matches!(
        service.get(&created.id).await,
        Err(ServiceError::Backend(BackendError::NotFound(_)))
    ));
}

#[tokio::test]
async fn empty_patch_is_rejected_before_the_backend() {
    let backend = MemoryBackend::new();
    let car: Car = backend.add_car("Toyota", "Yaris", 30.0, true).await;
    backend.state.lock().await.fail_car_updates = true;
    let service = VehicleService::new(&backend.repositories());

    assert!(matches!(
        service.update(&car.id, &CarPatch::default()).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert_eq!(backend.car(&car.id).await, car);
}

#[tokio::test]
async fn blank_ids_are_invalid() {
    let backend = MemoryBackend::new();
    backend.add_car("Toyota", "Yaris", 30.0, true).await;
    let service = VehicleService::new(&backend.repositories());

    assert!(matches!(
        service.get("  ").await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        service.delete("").await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        service.update("", &CarPatch::availability(false)).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert_eq!(service.list().await.unwrap().len(), 1);
}
