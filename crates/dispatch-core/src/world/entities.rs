use super::*;

impl DispatchWorld {
    pub fn create_driver(
        &mut self,
        id: Option<String>,
        x: i64,
        y: i64,
    ) -> Result<DriverSnapshot, EngineError> {
        if !Position::new(x, y).in_bounds() {
            return Err(EngineError::invalid_input(format!(
                "driver position ({x}, {y}) is off the grid"
            )));
        }

        let driver_id = match id {
            Some(id) => {
                if id.trim().is_empty() {
                    return Err(EngineError::invalid_input("driver id must be non-empty"));
                }
                if self.drivers.contains_key(&id) {
                    return Err(EngineError::conflict(format!(
                        "driver id already exists: {id}"
                    )));
                }
                id
            }
            None => self.fresh_id("driver"),
        };

        let driver = Driver {
            id: driver_id.clone(),
            x,
            y,
            status: DriverStatus::Available,
            assigned_count: 0,
            last_busy_tick: None,
            current_ride_id: None,
            is_heading_to_dropoff: false,
        };
        let snapshot = driver.snapshot();
        self.drivers.insert(driver_id.clone(), driver);
        self.push_event(
            EventType::DriverCreated,
            &driver_id,
            Some(json!({ "x": x, "y": y })),
        );

        Ok(snapshot)
    }

    /// Removing a driver fails its bound ride, if any. The failed ride
    /// keeps its `driver_id` as an audit trail of who abandoned it.
    pub fn delete_driver(&mut self, driver_id: &str) -> Result<(), EngineError> {
        let Some(driver) = self.drivers.remove(driver_id) else {
            return Err(EngineError::not_found(EntityKind::Driver, driver_id));
        };

        let mut failed_ride_id = None;
        if let Some(ride_id) = driver.current_ride_id.as_deref() {
            if let Some(ride) = self.rides.get_mut(ride_id) {
                if matches!(
                    ride.status,
                    RideStatus::AwaitingAccept | RideStatus::InProgress
                ) {
                    ride.status = RideStatus::Failed;
                    failed_ride_id = Some(ride_id.to_string());
                }
            }
        }
        if let Some(ride_id) = failed_ride_id {
            self.push_event(
                EventType::RideFailed,
                &ride_id,
                Some(json!({ "cause": "driver_deleted", "driver_id": driver_id })),
            );
        }
        self.push_event(EventType::DriverDeleted, driver_id, None);

        Ok(())
    }

    pub fn create_rider(
        &mut self,
        id: Option<String>,
        x: i64,
        y: i64,
    ) -> Result<RiderSnapshot, EngineError> {
        if !Position::new(x, y).in_bounds() {
            return Err(EngineError::invalid_input(format!(
                "rider position ({x}, {y}) is off the grid"
            )));
        }

        let rider_id = match id {
            Some(id) => {
                if id.trim().is_empty() {
                    return Err(EngineError::invalid_input("rider id must be non-empty"));
                }
                if self.riders.contains_key(&id) {
                    return Err(EngineError::conflict(format!(
                        "rider id already exists: {id}"
                    )));
                }
                id
            }
            None => self.fresh_id("rider"),
        };

        let rider = Rider {
            id: rider_id.clone(),
            x,
            y,
        };
        let snapshot = rider.snapshot();
        self.riders.insert(rider_id.clone(), rider);
        self.push_event(
            EventType::RiderCreated,
            &rider_id,
            Some(json!({ "x": x, "y": y })),
        );

        Ok(snapshot)
    }

    /// Removing a rider fails every non-terminal ride it owns and releases
    /// any driver bound to one of them. Cascades never error.
    pub fn delete_rider(&mut self, rider_id: &str) -> Result<(), EngineError> {
        if self.riders.remove(rider_id).is_none() {
            return Err(EngineError::not_found(EntityKind::Rider, rider_id));
        }

        let mut failed_ride_ids = Vec::new();
        let mut released_driver_ids = Vec::new();
        for ride in self.rides.values_mut() {
            if ride.rider_id == rider_id && ride.status.is_active() {
                ride.status = RideStatus::Failed;
                if let Some(driver_id) = ride.driver_id.clone() {
                    released_driver_ids.push(driver_id);
                }
                failed_ride_ids.push(ride.id.clone());
            }
        }

        for driver_id in &released_driver_ids {
            self.release_driver(driver_id);
        }
        for ride_id in &failed_ride_ids {
            self.push_event(
                EventType::RideFailed,
                ride_id,
                Some(json!({ "cause": "rider_deleted", "rider_id": rider_id })),
            );
        }
        self.push_event(EventType::RiderDeleted, rider_id, None);

        Ok(())
    }
}
