//! Reservation lifecycle against the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use carshare_core::{
    Availability, CreateReservation, ModifyReservation, ReservationError, ReservationId,
    ReservationLifecycle, UserId, VehicleId,
};
use carshare_testing::{InMemoryReservationStore, RecordingNotifier, at, init_test_tracing};
use futures::future::join_all;
use std::sync::Arc;

type Lifecycle = ReservationLifecycle<InMemoryReservationStore, RecordingNotifier>;

fn setup() -> (Lifecycle, InMemoryReservationStore, RecordingNotifier) {
    init_test_tracing();
    let store = InMemoryReservationStore::with_vehicles([(7, "Model 3"), (8, "Leaf")]);
    let notifier = RecordingNotifier::new();
    let lifecycle = ReservationLifecycle::new(store.clone(), notifier.clone());
    (lifecycle, store, notifier)
}

fn create(user: i64, vehicle: i64, start: i64, end: i64) -> CreateReservation {
    CreateReservation {
        user_id: UserId::new(user),
        vehicle_id: VehicleId::new(vehicle),
        start_time: at(start),
        end_time: at(end),
    }
}

fn availability(store: &InMemoryReservationStore, id: i64) -> Availability {
    store.vehicle(VehicleId::new(id)).unwrap().availability
}

#[tokio::test]
async fn create_then_cancel_round_trip() {
    let (lifecycle, store, notifier) = setup();

    let reservation = lifecycle.create_reservation(create(3, 7, 10, 12)).await.unwrap();

    assert!(reservation.id.get() > 0);
    assert_eq!(availability(&store, 7), Availability::Unavailable);
    let listed: Vec<_> = lifecycle
        .list_available_vehicles()
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(listed, vec![VehicleId::new(8)]);

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].reservation_id, reservation.id);
    assert_eq!(notices[0].start_time, at(10));

    let cancelled = lifecycle.cancel_reservation(reservation.id).await.unwrap();

    assert_eq!(cancelled, reservation);
    assert_eq!(availability(&store, 7), Availability::Available);
    assert_eq!(
        lifecycle.get_reservation(reservation.id).await,
        Err(ReservationError::NotFound {
            reservation_id: reservation.id
        })
    );
    assert_eq!(lifecycle.list_available_vehicles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn booking_an_unavailable_vehicle_creates_nothing() {
    let (lifecycle, store, notifier) = setup();
    lifecycle.create_reservation(create(3, 7, 10, 12)).await.unwrap();

    let err = lifecycle
        .create_reservation(create(4, 7, 13, 14))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReservationError::VehicleUnavailable {
            vehicle_id: VehicleId::new(7)
        }
    );
    assert_eq!(store.reservations().len(), 1);
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn unknown_vehicle_is_unavailable() {
    let (lifecycle, store, _notifier) = setup();

    let err = lifecycle
        .create_reservation(create(3, 99, 10, 12))
        .await
        .unwrap_err();

    assert!(matches!(err, ReservationError::VehicleUnavailable { .. }));
    assert!(store.reservations().is_empty());
}

#[tokio::test]
async fn window_must_end_after_start() {
    let (lifecycle, store, notifier) = setup();

    for (start, end) in [(12, 10), (10, 10)] {
        let err = lifecycle
            .create_reservation(create(3, 7, start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::InvalidRequest(_)));
    }

    assert_eq!(availability(&store, 7), Availability::Available);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn non_positive_ids_are_rejected() {
    let (lifecycle, _store, _notifier) = setup();

    assert!(matches!(
        lifecycle.create_reservation(create(0, 7, 10, 12)).await,
        Err(ReservationError::InvalidRequest(_))
    ));
    assert!(matches!(
        lifecycle.create_reservation(create(3, -1, 10, 12)).await,
        Err(ReservationError::InvalidRequest(_))
    ));
    assert!(matches!(
        lifecycle.cancel_reservation(ReservationId::new(0)).await,
        Err(ReservationError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn modify_changes_only_the_window() {
    let (lifecycle, store, _notifier) = setup();
    let reservation = lifecycle.create_reservation(create(3, 7, 10, 12)).await.unwrap();

    let updated = lifecycle
        .modify_reservation(ModifyReservation {
            reservation_id: reservation.id,
            start_time: at(14),
            end_time: at(18),
        })
        .await
        .unwrap();

    assert_eq!(updated.id, reservation.id);
    assert_eq!(updated.user_id, reservation.user_id);
    assert_eq!(updated.vehicle_id, reservation.vehicle_id);
    assert_eq!((updated.start_time, updated.end_time), (at(14), at(18)));
    assert_eq!(lifecycle.get_reservation(reservation.id).await.unwrap(), updated);
    assert_eq!(availability(&store, 7), Availability::Unavailable);
}

#[tokio::test]
async fn modify_and_cancel_of_missing_reservation_are_not_found() {
    let (lifecycle, _store, _notifier) = setup();
    let missing = ReservationId::new(42);

    assert_eq!(
        lifecycle
            .modify_reservation(ModifyReservation {
                reservation_id: missing,
                start_time: at(1),
                end_time: at(2),
            })
            .await,
        Err(ReservationError::NotFound {
            reservation_id: missing
        })
    );
    assert_eq!(
        lifecycle.cancel_reservation(missing).await,
        Err(ReservationError::NotFound {
            reservation_id: missing
        })
    );
}

#[tokio::test]
async fn store_failure_is_persistence_error_and_changes_nothing() {
    let (lifecycle, store, notifier) = setup();
    store.fail_writes(true);

    let err = lifecycle
        .create_reservation(create(3, 7, 10, 12))
        .await
        .unwrap_err();

    assert!(matches!(err, ReservationError::Persistence(_)));
    assert_eq!(availability(&store, 7), Availability::Available);
    assert!(store.reservations().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_for_one_vehicle_yield_one_success() {
    let (lifecycle, store, notifier) = setup();
    let lifecycle = Arc::new(lifecycle);

    let attempts = (1..=2).map(|user| {
        let lifecycle = Arc::clone(&lifecycle);
        tokio::spawn(async move { lifecycle.create_reservation(create(user, 7, 10, 12)).await })
    });

    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(ReservationError::VehicleUnavailable { .. })))
            .count(),
        1
    );
    assert_eq!(store.reservations().len(), 1);
    assert_eq!(notifier.notices().len(), 1);
}
