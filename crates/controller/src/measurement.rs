use foundation::geo::{LatLng, surface_distance_m};

/// Two-click measurement state machine.
///
/// Transient only; nothing here is ever persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Measurement {
    #[default]
    Idle,
    Armed {
        origin: LatLng,
    },
}

/// Outcome of feeding a context-click into the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureStep {
    /// First click: origin recorded, waiting for the target.
    Started { origin: LatLng },
    /// Second click: distance computed, state back to idle.
    Measured {
        origin: LatLng,
        target: LatLng,
        distance_m: f64,
    },
}

impl Measurement {
    pub fn click(&mut self, at: LatLng) -> MeasureStep {
        match *self {
            Measurement::Idle => {
                *self = Measurement::Armed { origin: at };
                MeasureStep::Started { origin: at }
            }
            Measurement::Armed { origin } => {
                *self = Measurement::Idle;
                MeasureStep::Measured {
                    origin,
                    target: at,
                    distance_m: surface_distance_m(origin, at),
                }
            }
        }
    }

    /// Drops any pending origin. Returns whether a measurement was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.is_armed();
        *self = Measurement::Idle;
        was_armed
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Measurement::Armed { .. })
    }
}
