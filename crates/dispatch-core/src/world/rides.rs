use super::*;

impl DispatchWorld {
    /// Create a ride and dispatch it synchronously. The returned snapshot
    /// is either `awaiting_accept` under the selected driver or already
    /// `failed` when nobody is eligible.
    pub fn request_ride(
        &mut self,
        rider_id: &str,
        pickup: Position,
        dropoff: Position,
    ) -> Result<RideSnapshot, EngineError> {
        if !pickup.in_bounds() || !dropoff.in_bounds() {
            return Err(EngineError::invalid_input(
                "pickup and dropoff must lie on the grid",
            ));
        }
        if !self.riders.contains_key(rider_id) {
            return Err(EngineError::not_found(EntityKind::Rider, rider_id));
        }

        let ride_id = self.fresh_id("ride");
        let ride = Ride {
            id: ride_id.clone(),
            rider_id: rider_id.to_string(),
            pickup,
            dropoff,
            status: RideStatus::Waiting,
            driver_id: None,
            rejected_driver_ids: BTreeSet::new(),
        };
        self.rides.insert(ride_id.clone(), ride);
        self.push_event(
            EventType::RideRequested,
            &ride_id,
            Some(json!({ "rider_id": rider_id })),
        );

        self.dispatch_ride(&ride_id);
        self.ride_result(&ride_id)
    }

    pub fn accept_ride(&mut self, ride_id: &str) -> Result<RideSnapshot, EngineError> {
        let Some(ride) = self.rides.get(ride_id) else {
            return Err(EngineError::not_found(EntityKind::Ride, ride_id));
        };
        if ride.status != RideStatus::AwaitingAccept {
            return Err(EngineError::conflict(format!(
                "ride {ride_id} is not awaiting acceptance"
            )));
        }
        let Some(driver_id) = ride.driver_id.clone() else {
            return Err(EngineError::conflict(format!(
                "ride {ride_id} has no driver bound"
            )));
        };

        let driver = match self.drivers.get_mut(&driver_id) {
            Some(driver)
                if driver.status == DriverStatus::Assigned
                    && driver.current_ride_id.as_deref() == Some(ride_id) =>
            {
                driver
            }
            _ => {
                return Err(EngineError::conflict(format!(
                    "driver {driver_id} no longer holds ride {ride_id}"
                )))
            }
        };
        driver.status = DriverStatus::OnTrip;
        driver.is_heading_to_dropoff = false;
        driver.assigned_count = driver.assigned_count.saturating_add(1);

        if let Some(ride) = self.rides.get_mut(ride_id) {
            ride.status = RideStatus::InProgress;
        }
        self.push_event(
            EventType::RideAccepted,
            ride_id,
            Some(json!({ "driver_id": driver_id })),
        );

        self.ride_result(ride_id)
    }

    /// The rejecting driver enters the ride's rejection set and is never
    /// offered this ride again. Re-dispatch either re-offers to the next
    /// candidate or fails the ride on the spot.
    pub fn reject_ride(&mut self, ride_id: &str) -> Result<RideSnapshot, EngineError> {
        let Some(ride) = self.rides.get(ride_id) else {
            return Err(EngineError::not_found(EntityKind::Ride, ride_id));
        };
        if ride.status != RideStatus::AwaitingAccept {
            return Err(EngineError::conflict(format!(
                "ride {ride_id} is not awaiting acceptance"
            )));
        }
        let Some(driver_id) = ride.driver_id.clone() else {
            return Err(EngineError::conflict(format!(
                "ride {ride_id} has no driver bound"
            )));
        };

        if let Some(ride) = self.rides.get_mut(ride_id) {
            ride.rejected_driver_ids.insert(driver_id.clone());
            ride.status = RideStatus::Waiting;
            ride.driver_id = None;
        }
        self.release_driver(&driver_id);
        self.push_event(
            EventType::RideRejected,
            ride_id,
            Some(json!({ "driver_id": driver_id })),
        );

        self.dispatch_ride(ride_id);
        self.ride_result(ride_id)
    }

    /// Select and bind the next candidate, or fail the ride. Shared by the
    /// request path and the post-rejection fallback.
    pub(super) fn dispatch_ride(&mut self, ride_id: &str) {
        let Some(ride) = self.rides.get(ride_id) else {
            return;
        };

        match dispatch::select_driver(ride, &self.drivers, self.tick) {
            Some(driver_id) => {
                if let Some(driver) = self.drivers.get_mut(&driver_id) {
                    driver.status = DriverStatus::Assigned;
                    driver.current_ride_id = Some(ride_id.to_string());
                }
                if let Some(ride) = self.rides.get_mut(ride_id) {
                    ride.driver_id = Some(driver_id.clone());
                    ride.status = RideStatus::AwaitingAccept;
                }
                self.push_event(
                    EventType::RideOffered,
                    ride_id,
                    Some(json!({ "driver_id": driver_id })),
                );
            }
            None => {
                if let Some(ride) = self.rides.get_mut(ride_id) {
                    ride.status = RideStatus::Failed;
                    ride.driver_id = None;
                }
                self.push_event(
                    EventType::RideFailed,
                    ride_id,
                    Some(json!({ "cause": "no_eligible_driver" })),
                );
            }
        }
    }

    /// Invoked by the tick engine when an on-trip driver rests on the
    /// dropoff: the rider teleports to the dropoff, the driver is released
    /// with its idle clock restarted, and the ride becomes terminal.
    pub(super) fn complete_ride(&mut self, ride_id: &str, driver_id: &str) {
        let Some((dropoff, rider_id)) = self
            .rides
            .get(ride_id)
            .map(|ride| (ride.dropoff, ride.rider_id.clone()))
        else {
            return;
        };

        if let Some(ride) = self.rides.get_mut(ride_id) {
            ride.status = RideStatus::Completed;
        }
        if let Some(rider) = self.riders.get_mut(&rider_id) {
            rider.x = dropoff.x;
            rider.y = dropoff.y;
        }
        if let Some(driver) = self.drivers.get_mut(driver_id) {
            driver.status = DriverStatus::Available;
            driver.current_ride_id = None;
            driver.is_heading_to_dropoff = false;
            driver.last_busy_tick = Some(self.tick);
        }
        self.push_event(
            EventType::RideCompleted,
            ride_id,
            Some(json!({ "driver_id": driver_id })),
        );
    }

    /// Return a driver to the available pool, clearing its ride linkage.
    pub(super) fn release_driver(&mut self, driver_id: &str) {
        if let Some(driver) = self.drivers.get_mut(driver_id) {
            driver.status = DriverStatus::Available;
            driver.current_ride_id = None;
            driver.is_heading_to_dropoff = false;
        }
    }

    pub(super) fn ride_result(&self, ride_id: &str) -> Result<RideSnapshot, EngineError> {
        self.rides
            .get(ride_id)
            .map(Ride::snapshot)
            .ok_or_else(|| EngineError::not_found(EntityKind::Ride, ride_id))
    }
}
