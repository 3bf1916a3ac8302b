use crate::frame::{RawFrame, compute_humidity, compute_temperature};

/// Reading returned by the DHT11 sensor.
///
/// Failed exchanges produce a reading with `is_valid == false` and no values.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: Option<f32>,
    /// Relative humidity in percent.
    pub humidity: Option<f32>,
    /// Whether the values come from a frame with a valid checksum.
    pub is_valid: bool,
}

impl Reading {
    /// Reading of a failed exchange.
    pub const INVALID: Reading = Reading {
        temperature: None,
        humidity: None,
        is_valid: false,
    };

    /// Converts a validated frame.
    pub fn from_frame(frame: &RawFrame) -> Self {
        Reading {
            temperature: Some(compute_temperature(frame)),
            humidity: Some(compute_humidity(frame)),
            is_valid: true,
        }
    }

    pub(crate) fn from_outcome(frame: &RawFrame, success: bool) -> Self {
        if success {
            Self::from_frame(frame)
        } else {
            Self::INVALID
        }
    }
}

/// Result of [`Dht11::poll`](crate::Dht11::poll).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReadOutcome {
    /// A new exchange with the sensor took place.
    Fresh(Reading),
    /// The minimum interval had not passed; the previous outcome was repeated
    /// without touching the line.
    Cached(Reading),
}

impl ReadOutcome {
    pub const fn reading(&self) -> Reading {
        match self {
            ReadOutcome::Fresh(reading) | ReadOutcome::Cached(reading) => *reading,
        }
    }

    pub const fn is_cached(&self) -> bool {
        matches!(self, ReadOutcome::Cached(_))
    }
}
