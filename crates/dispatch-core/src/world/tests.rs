use super::*;

fn world_with_driver(id: &str, x: i64, y: i64) -> DispatchWorld {
    let mut world = DispatchWorld::new();
    world
        .create_driver(Some(id.to_string()), x, y)
        .expect("driver created");
    world
}

#[test]
fn happy_path_trip_runs_to_completion() {
    let mut world = DispatchWorld::new();
    world
        .create_driver(Some("D1".to_string()), 0, 0)
        .expect("driver created");
    world
        .create_driver(Some("D2".to_string()), 10, 10)
        .expect("driver created");
    world
        .create_rider(Some("R".to_string()), 5, 5)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(5, 5), Position::new(7, 5))
        .expect("ride requested");
    // equal ETA, equal load, both never busy: ascending id picks D1
    assert_eq!(ride.status, RideStatus::AwaitingAccept);
    assert_eq!(ride.driver_id.as_deref(), Some("D1"));

    world.accept_ride(&ride.id).expect("ride accepted");
    assert_eq!(
        world.drivers["D1"].status,
        DriverStatus::OnTrip
    );

    // x-first pathing: five ticks east, then five north onto the pickup
    for _ in 0..5 {
        world.step();
    }
    assert_eq!(world.drivers["D1"].position(), Position::new(5, 0));
    for _ in 0..5 {
        world.step();
    }
    let driver = &world.drivers["D1"];
    assert_eq!(driver.position(), Position::new(5, 5));
    assert!(driver.is_heading_to_dropoff);
    assert_eq!(world.rides[&ride.id].status, RideStatus::InProgress);

    world.step();
    assert_eq!(world.drivers["D1"].position(), Position::new(6, 5));
    world.step();

    let driver = &world.drivers["D1"];
    assert_eq!(driver.position(), Position::new(7, 5));
    assert_eq!(driver.status, DriverStatus::Available);
    assert_eq!(driver.assigned_count, 1);
    assert_eq!(driver.last_busy_tick, Some(12));
    assert_eq!(driver.current_ride_id, None);
    assert!(!driver.is_heading_to_dropoff);
    assert_eq!(world.rides[&ride.id].status, RideStatus::Completed);
    assert_eq!(world.riders["R"].x, 7);
    assert_eq!(world.riders["R"].y, 5);
}

#[test]
fn reject_falls_back_to_next_candidate() {
    let mut world = DispatchWorld::new();
    world
        .create_driver(Some("D1".to_string()), 0, 0)
        .expect("driver created");
    world
        .create_driver(Some("D2".to_string()), 50, 50)
        .expect("driver created");
    world
        .create_rider(Some("R".to_string()), 1, 0)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(1, 0), Position::new(1, 1))
        .expect("ride requested");
    assert_eq!(ride.driver_id.as_deref(), Some("D1"));

    let ride = world.reject_ride(&ride.id).expect("ride rejected");
    assert_eq!(ride.status, RideStatus::AwaitingAccept);
    assert_eq!(ride.driver_id.as_deref(), Some("D2"));
    assert_eq!(ride.rejected_driver_ids, vec!["D1".to_string()]);

    let d1 = &world.drivers["D1"];
    assert_eq!(d1.status, DriverStatus::Available);
    assert_eq!(d1.assigned_count, 0);
    assert_eq!(d1.current_ride_id, None);
    assert_eq!(
        world.drivers["D2"].current_ride_id.as_deref(),
        Some(ride.id.as_str())
    );
}

#[test]
fn request_without_drivers_fails_immediately() {
    let mut world = DispatchWorld::new();
    world
        .create_rider(Some("R".to_string()), 0, 0)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(0, 0), Position::new(3, 3))
        .expect("ride requested");
    assert_eq!(ride.status, RideStatus::Failed);
    assert_eq!(ride.driver_id, None);
}

#[test]
fn deleting_driver_mid_trip_fails_the_ride() {
    let mut world = world_with_driver("D1", 0, 0);
    world
        .create_rider(Some("R".to_string()), 2, 0)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(2, 0), Position::new(5, 0))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");
    world.step();
    assert_eq!(world.drivers["D1"].position(), Position::new(1, 0));

    world.delete_driver("D1").expect("driver deleted");
    assert!(!world.drivers.contains_key("D1"));
    let ride = &world.rides[&ride.id];
    assert_eq!(ride.status, RideStatus::Failed);
    // audit trail survives the cascade
    assert_eq!(ride.driver_id.as_deref(), Some("D1"));
}

#[test]
fn deleting_rider_fails_rides_and_releases_driver() {
    let mut world = world_with_driver("D1", 0, 0);
    world
        .create_rider(Some("R".to_string()), 1, 1)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(1, 1), Position::new(9, 9))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");

    world.delete_rider("R").expect("rider deleted");
    assert!(!world.riders.contains_key("R"));
    assert_eq!(world.rides[&ride.id].status, RideStatus::Failed);
    let driver = &world.drivers["D1"];
    assert_eq!(driver.status, DriverStatus::Available);
    assert_eq!(driver.current_ride_id, None);
}

#[test]
fn pickup_under_driver_pauses_one_tick_before_heading_out() {
    let mut world = world_with_driver("D1", 3, 3);
    world
        .create_rider(Some("R".to_string()), 3, 3)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(3, 3), Position::new(6, 3))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");

    world.step();
    let driver = &world.drivers["D1"];
    assert_eq!(driver.position(), Position::new(3, 3));
    assert!(driver.is_heading_to_dropoff);

    world.step();
    assert_eq!(world.drivers["D1"].position(), Position::new(4, 3));

    world.step();
    world.step();
    assert_eq!(world.rides[&ride.id].status, RideStatus::Completed);
    assert_eq!(world.drivers["D1"].last_busy_tick, Some(4));
}

#[test]
fn pickup_equal_to_dropoff_completes_on_second_tick() {
    let mut world = world_with_driver("D1", 2, 2);
    world
        .create_rider(Some("R".to_string()), 2, 2)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(2, 2), Position::new(2, 2))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");

    world.step();
    assert_eq!(world.rides[&ride.id].status, RideStatus::InProgress);
    assert!(world.drivers["D1"].is_heading_to_dropoff);

    world.step();
    assert_eq!(world.rides[&ride.id].status, RideStatus::Completed);
    assert_eq!(world.drivers["D1"].last_busy_tick, Some(2));
}

#[test]
fn grid_edge_cells_behave_like_interior_cells() {
    let mut world = world_with_driver("D1", 99, 99);
    world
        .create_rider(Some("R".to_string()), 99, 0)
        .expect("rider created");

    let ride = world
        .request_ride("R", Position::new(99, 0), Position::new(0, 0))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");

    world.step();
    assert_eq!(world.drivers["D1"].position(), Position::new(99, 98));
}

#[test]
fn tick_without_on_trip_drivers_only_bumps_counter() {
    let mut world = world_with_driver("D1", 4, 4);
    world
        .create_rider(Some("R".to_string()), 8, 8)
        .expect("rider created");
    // offered but not yet accepted: the driver must not move
    let ride = world
        .request_ride("R", Position::new(8, 8), Position::new(9, 9))
        .expect("ride requested");

    let before = world.snapshot_for_current_tick();
    world.step();
    let after = world.snapshot_for_current_tick();

    assert_eq!(after.tick, before.tick + 1);
    assert_eq!(after.drivers, before.drivers);
    assert_eq!(after.riders, before.riders);
    assert_eq!(after.rides, before.rides);
    assert_eq!(world.rides[&ride.id].status, RideStatus::AwaitingAccept);
}

#[test]
fn reset_is_idempotent() {
    let mut world = world_with_driver("D1", 0, 0);
    world
        .create_rider(Some("R".to_string()), 5, 5)
        .expect("rider created");
    world
        .request_ride("R", Position::new(5, 5), Position::new(6, 6))
        .expect("ride requested");
    world.step();

    world.reset();
    let once = world.snapshot_for_current_tick();
    let once_events = world.events().to_vec();

    world.reset();
    assert_eq!(world.snapshot_for_current_tick(), once);
    assert_eq!(world.events(), once_events.as_slice());
    assert_eq!(world.current_tick(), 0);
    assert!(world.drivers.is_empty());
    assert!(world.riders.is_empty());
    assert!(world.rides.is_empty());
}

#[test]
fn generated_ids_skip_caller_supplied_values() {
    let mut world = DispatchWorld::new();
    world
        .create_driver(Some("driver_0001".to_string()), 0, 0)
        .expect("driver created");

    let generated = world.create_driver(None, 1, 1).expect("driver created");
    assert_ne!(generated.id, "driver_0001");
    assert!(world.drivers.contains_key(&generated.id));
}

#[test]
fn lifecycle_is_recorded_in_the_event_log() {
    let mut world = world_with_driver("D1", 0, 0);
    world
        .create_rider(Some("R".to_string()), 0, 0)
        .expect("rider created");
    let ride = world
        .request_ride("R", Position::new(0, 0), Position::new(1, 0))
        .expect("ride requested");
    world.accept_ride(&ride.id).expect("ride accepted");
    world.step();
    world.step();

    let observed = world
        .events()
        .iter()
        .map(|event| event.event_type)
        .collect::<Vec<_>>();
    assert_eq!(
        observed,
        vec![
            EventType::DriverCreated,
            EventType::RiderCreated,
            EventType::RideRequested,
            EventType::RideOffered,
            EventType::RideAccepted,
            EventType::RideCompleted,
        ]
    );

    // same-tick entries are sequenced, later ticks restart at zero
    assert_eq!(world.events()[0].sequence_in_tick, 0);
    assert_eq!(world.events()[2].sequence_in_tick, 2);
    assert_eq!(world.events()[3].sequence_in_tick, 3);
    let completed = world.events().last().expect("completion event");
    assert_eq!(completed.tick, 2);
    assert_eq!(completed.sequence_in_tick, 0);
}
