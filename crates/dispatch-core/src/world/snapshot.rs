use super::*;

impl Driver {
    pub(super) fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot {
            id: self.id.clone(),
            x: self.x,
            y: self.y,
            status: self.status,
            assigned_count: self.assigned_count,
            last_busy_tick: self.last_busy_tick,
            current_ride_id: self.current_ride_id.clone(),
            is_heading_to_dropoff: self.is_heading_to_dropoff,
        }
    }
}

impl Rider {
    pub(super) fn snapshot(&self) -> RiderSnapshot {
        RiderSnapshot {
            id: self.id.clone(),
            x: self.x,
            y: self.y,
        }
    }
}

impl Ride {
    pub(super) fn snapshot(&self) -> RideSnapshot {
        RideSnapshot {
            id: self.id.clone(),
            rider_id: self.rider_id.clone(),
            pickup: self.pickup,
            dropoff: self.dropoff,
            status: self.status,
            driver_id: self.driver_id.clone(),
            rejected_driver_ids: self.rejected_driver_ids.iter().cloned().collect(),
        }
    }
}

impl DispatchWorld {
    /// Full value snapshot of the world. Collections come out in ascending
    /// id order; callers hold no references into the live tables.
    pub fn snapshot_for_current_tick(&self) -> WorldSnapshot {
        WorldSnapshot {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            tick: self.tick,
            drivers: self.drivers.values().map(Driver::snapshot).collect(),
            riders: self.riders.values().map(Rider::snapshot).collect(),
            rides: self.rides.values().map(Ride::snapshot).collect(),
        }
    }

    pub fn driver_snapshot(&self, driver_id: &str) -> Option<DriverSnapshot> {
        self.drivers.get(driver_id).map(Driver::snapshot)
    }

    pub fn rider_snapshot(&self, rider_id: &str) -> Option<RiderSnapshot> {
        self.riders.get(rider_id).map(Rider::snapshot)
    }

    pub fn ride_snapshot(&self, ride_id: &str) -> Option<RideSnapshot> {
        self.rides.get(ride_id).map(Ride::snapshot)
    }
}
