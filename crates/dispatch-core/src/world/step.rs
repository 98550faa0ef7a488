use super::*;

impl DispatchWorld {
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advance the simulation by one tick: bump the counter, then move each
    /// on-trip driver one cell along its Manhattan path, firing phase
    /// transitions and completions. Drivers advance in ascending id order.
    pub fn step(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);

        let on_trip_ids = self
            .drivers
            .iter()
            .filter(|(_, driver)| driver.status == DriverStatus::OnTrip)
            .map(|(id, _)| id.clone())
            .collect::<Vec<_>>();
        for driver_id in on_trip_ids {
            self.advance_driver(&driver_id);
        }

        self.tick
    }

    fn advance_driver(&mut self, driver_id: &str) {
        let Some(driver) = self.drivers.get(driver_id) else {
            return;
        };
        let Some(ride_id) = driver.current_ride_id.clone() else {
            return;
        };
        let (pickup, dropoff) = match self.rides.get(&ride_id) {
            Some(ride) if ride.status == RideStatus::InProgress => (ride.pickup, ride.dropoff),
            _ => return,
        };

        let heading_to_dropoff = driver.is_heading_to_dropoff;
        let target = if heading_to_dropoff { dropoff } else { pickup };

        if let Some(driver) = self.drivers.get_mut(driver_id) {
            // one cell per tick, x axis before y, so trajectories are
            // predictable from start and target alone
            if driver.x != target.x {
                driver.x += if driver.x < target.x { 1 } else { -1 };
            } else if driver.y != target.y {
                driver.y += if driver.y < target.y { 1 } else { -1 };
            }
        }

        let Some(driver) = self.drivers.get(driver_id) else {
            return;
        };
        if !heading_to_dropoff {
            // The tick that puts the driver at rest on the pickup (zero
            // cells moved if it already stood there) only flips the phase;
            // dropoff progress starts next tick.
            if driver.position() == pickup {
                if let Some(driver) = self.drivers.get_mut(driver_id) {
                    driver.is_heading_to_dropoff = true;
                }
            }
        } else if driver.position() == dropoff {
            self.complete_ride(&ride_id, driver_id);
        }
    }
}
