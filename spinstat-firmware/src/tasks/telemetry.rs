//! Telemetry task
//!
//! Owns the metrics pipeline: raw measurements in, snapshots out.

use defmt::*;

use spinstat_core::telemetry::Telemetry;

use crate::channels::{MEASUREMENT_CHANNEL, SNAPSHOT};
use crate::config;

/// Telemetry task - decodes measurements and publishes smoothed metrics
#[embassy_executor::task]
pub async fn telemetry_task() {
    info!("Telemetry task started");

    let mut telemetry = match Telemetry::new(config::engine_config()) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            error!("Invalid engine config: {:?}, using defaults", e);
            Telemetry::default()
        }
    };

    loop {
        let raw = MEASUREMENT_CHANNEL.receive().await;

        match telemetry.ingest(&raw) {
            Ok(Some(snapshot)) => {
                debug!(
                    "cadence={} rpm speed={} km/h distance={} km",
                    snapshot.cadence_rpm, snapshot.speed_kmh, snapshot.distance_km
                );
                SNAPSHOT.signal(snapshot);
            }
            Ok(None) => {
                info!(
                    "Distance baseline set at {} km",
                    telemetry.engine().start_distance_km()
                );
            }
            Err(e) => {
                warn!(
                    "Dropped measurement ({} rejected so far): {:?}",
                    telemetry.rejected_frames(),
                    e
                );
            }
        }
    }
}
