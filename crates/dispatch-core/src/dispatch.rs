//! Driver selection under the (eta, load, idle-time) fairness ordering.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use contracts::{DriverStatus, Position};

use crate::world::{Driver, Ride};

/// Lexicographic fairness key. Lower sorts better: shortest pickup ETA
/// first, then fewest lifetime acceptances, then the longest-idle driver
/// (never-busy drivers count as maximally idle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FairnessKey {
    eta: u64,
    assigned_count: u64,
    idleness: Reverse<u64>,
}

fn fairness_key(driver: &Driver, pickup: &Position, current_tick: u64) -> FairnessKey {
    let idle_ticks = match driver.last_busy_tick {
        Some(last_busy_tick) => current_tick.saturating_sub(last_busy_tick),
        None => u64::MAX,
    };

    FairnessKey {
        eta: driver.position().manhattan_distance(pickup),
        assigned_count: driver.assigned_count,
        idleness: Reverse(idle_ticks),
    }
}

/// Pure selection: returns the best eligible driver for `ride`, or `None`
/// when no driver is `available` outside the ride's rejection set.
/// Commitment is the caller's job; nothing here mutates the world.
pub fn select_driver(
    ride: &Ride,
    drivers: &BTreeMap<String, Driver>,
    current_tick: u64,
) -> Option<String> {
    drivers
        .values()
        .filter(|driver| driver.status == DriverStatus::Available)
        .filter(|driver| !ride.rejected_driver_ids.contains(&driver.id))
        .min_by(|a, b| {
            fairness_key(a, &ride.pickup, current_tick)
                .cmp(&fairness_key(b, &ride.pickup, current_tick))
                // full-key ties fall to the ascending driver id
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|driver| driver.id.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn driver_at(id: &str, x: i64, y: i64) -> Driver {
        Driver {
            id: id.to_string(),
            x,
            y,
            status: DriverStatus::Available,
            assigned_count: 0,
            last_busy_tick: None,
            current_ride_id: None,
            is_heading_to_dropoff: false,
        }
    }

    fn ride_to(pickup: Position) -> Ride {
        Ride {
            id: "ride_0001".to_string(),
            rider_id: "rider_0001".to_string(),
            pickup,
            dropoff: Position::new(0, 0),
            status: contracts::RideStatus::Waiting,
            driver_id: None,
            rejected_driver_ids: BTreeSet::new(),
        }
    }

    fn table(drivers: Vec<Driver>) -> BTreeMap<String, Driver> {
        drivers
            .into_iter()
            .map(|driver| (driver.id.clone(), driver))
            .collect()
    }

    #[test]
    fn shortest_eta_wins() {
        let drivers = table(vec![driver_at("d1", 0, 0), driver_at("d2", 3, 3)]);
        let ride = ride_to(Position::new(1, 0));

        assert_eq!(select_driver(&ride, &drivers, 0).as_deref(), Some("d1"));
    }

    #[test]
    fn equal_eta_falls_to_lower_assigned_count() {
        let mut d1 = driver_at("d1", 0, 0);
        d1.assigned_count = 2;
        d1.last_busy_tick = Some(5);
        let mut d2 = driver_at("d2", 0, 0);
        d2.assigned_count = 1;
        d2.last_busy_tick = Some(5);
        let drivers = table(vec![d1, d2]);
        let ride = ride_to(Position::new(0, 0));

        assert_eq!(select_driver(&ride, &drivers, 10).as_deref(), Some("d2"));
    }

    #[test]
    fn equal_load_falls_to_longer_idle() {
        let mut d1 = driver_at("d1", 0, 0);
        d1.assigned_count = 1;
        d1.last_busy_tick = Some(2);
        let mut d2 = driver_at("d2", 0, 0);
        d2.assigned_count = 1;
        d2.last_busy_tick = Some(8);
        let drivers = table(vec![d1, d2]);
        let ride = ride_to(Position::new(0, 0));

        // idle(d1) = 8, idle(d2) = 2
        assert_eq!(select_driver(&ride, &drivers, 10).as_deref(), Some("d1"));
    }

    #[test]
    fn never_busy_outranks_recently_busy() {
        let fresh = driver_at("d2", 0, 0);
        let mut veteran = driver_at("d1", 0, 0);
        veteran.last_busy_tick = Some(9);
        let drivers = table(vec![veteran, fresh]);
        let ride = ride_to(Position::new(0, 0));

        assert_eq!(select_driver(&ride, &drivers, 10).as_deref(), Some("d2"));
    }

    #[test]
    fn full_tie_breaks_by_ascending_id() {
        let drivers = table(vec![driver_at("d2", 0, 0), driver_at("d1", 0, 0)]);
        let ride = ride_to(Position::new(0, 0));

        assert_eq!(select_driver(&ride, &drivers, 0).as_deref(), Some("d1"));
    }

    #[test]
    fn rejected_and_unavailable_drivers_are_ineligible() {
        let mut busy = driver_at("d1", 0, 0);
        busy.status = DriverStatus::OnTrip;
        let offline = {
            let mut driver = driver_at("d2", 0, 0);
            driver.status = DriverStatus::Offline;
            driver
        };
        let spurned = driver_at("d3", 0, 0);
        let fallback = driver_at("d4", 50, 50);
        let drivers = table(vec![busy, offline, spurned, fallback]);

        let mut ride = ride_to(Position::new(0, 0));
        ride.rejected_driver_ids.insert("d3".to_string());

        assert_eq!(select_driver(&ride, &drivers, 0).as_deref(), Some("d4"));
    }

    #[test]
    fn selection_is_deterministic() {
        let drivers = table(vec![
            driver_at("d3", 4, 4),
            driver_at("d1", 2, 2),
            driver_at("d2", 2, 2),
        ]);
        let ride = ride_to(Position::new(3, 3));

        let first = select_driver(&ride, &drivers, 7);
        let second = select_driver(&ride, &drivers, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_selects_nothing() {
        let ride = ride_to(Position::new(0, 0));
        assert_eq!(select_driver(&ride, &BTreeMap::new(), 0), None);
    }
}
