#![cfg(test)]
use fleetdash_common::models::{BookingStatus, Identity, Review, ReviewPatch};
use fleetdash_core::ServiceError;
use fleetdash_core::services::{ReviewRequest, ReviewService};

use crate::support::{MemoryBackend, at, identity};

#[tokio::test]
async fn reviews_carry_author_car_and_rental_period() {
    let backend = MemoryBackend::new();
    let ada: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    let car = backend.add_car("Mazda", "MX-5", 70.0, true).await;
    let booking = backend
        .add_booking("u1", &car.id, at(2024, 5, 1), at(2024, 5, 3), Some(140.0), BookingStatus::Completed)
        .await;
    let service = ReviewService::new(&backend.repositories());

    let request = ReviewRequest {
        user_id: None,
        car_id: car.id.clone(),
        booking_id: Some(booking.id.clone()),
        rating: 5,
        comment: Some("Top down all weekend".to_string()),
    };
    let created: Review = service.create(&ada, request).await.unwrap();
    assert_eq!(created.user_id, "u1");

    let found: Review = service.for_booking(&booking.id).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.cars.unwrap().label(), "Mazda MX-5");
    assert_eq!(found.profiles.unwrap().full_name(), "Ada Tester");
    assert_eq!(found.bookings.unwrap().start_date, at(2024, 5, 1));

    assert_eq!(service.for_car(&car.id).await.unwrap().len(), 1);
    assert_eq!(service.for_user("u1").await.unwrap().len(), 1);
    assert!(service.for_user("u2").await.unwrap().is_empty());
}

#[tokio::test]
async fn only_the_author_or_an_admin_edits_a_review() {
    let backend = MemoryBackend::new();
    let ada: Identity = identity(&backend.add_profile("u1", "Ada", false).await);
    let bob: Identity = identity(&backend.add_profile("u2", "Bob", false).await);
    let admin: Identity = identity(&backend.add_profile("admin", "Root", true).await);
    let car = backend.add_car("Mazda", "MX-5", 70.0, true).await;
    let service = ReviewService::new(&backend.repositories());
    let review: Review = service
        .create(
            &ada,
            ReviewRequest {
                user_id: None,
                car_id: car.id.clone(),
                booking_id: None,
                rating: 3,
                comment: None,
            },
        )
        .await
        .unwrap();
    let patch = ReviewPatch {
        rating: Some(4),
        comment: None,
    };

    assert!(matches!(
        service.update(&bob, &review.id, &patch).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert_eq!(service.update(&ada, &review.id, &patch).await.unwrap().rating, 4);
    assert!(matches!(
        service.delete(&bob, &review.id).await,
        Err(ServiceError::Forbidden(_))
    ));
    service.delete(&admin, &review.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_review_is_not_found() {
    let backend = MemoryBackend::new();
    let service = ReviewService::new(&backend.repositories());

    let err = service.get("review-404").await.unwrap_err();

    assert!(matches!(err, ServiceError::Backend(ref e) if e.is_not_found()));
}
