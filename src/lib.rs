//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The sensor talks over a single open-drain data line. The driver sends the
//! start signal, measures the 80 pulses of the answer inside a critical
//! section, decodes them by comparing the LOW and HIGH duration of each bit,
//! and validates the checksum. Reads closer together than two seconds are
//! served from the last result without touching the line.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`DelayNs`] for the start signal timing
//!
//! Pulse measurement runs inside [`critical_section::with`], so the final
//! binary must link a `critical-section` implementation (most HALs provide
//! one). Time between reads comes from a [`Clock`].
//!
//! The pulse timeout is counted in polling iterations. [`Dht11::new`] assumes
//! a core of up to 240 MHz; pass [`Config::with_cycles_per_us`] to
//! [`Dht11::with_config`] to match a slower or faster host.
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and emits log messages
//!
//! # Example
//!
//! ```ignore
//! use dht11_sensor::Dht11;
//!
//! let mut dht = Dht11::new(pin, delay, || now_ms());
//! dht.begin()?;
//!
//! let reading = dht.read();
//! if let (Some(t), Some(h)) = (reading.temperature, reading.humidity) {
//!     // use t and h
//! }
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

// MUST be the first module
mod fmt;

pub mod clock;
pub mod config;
pub mod dht11;
pub mod error;
pub mod frame;
pub mod pulse;
pub mod reading;
pub mod specs;

pub use clock::Clock;
pub use config::{Config, DEFAULT_CYCLES_PER_US};
pub use dht11::Dht11;
pub use error::DhtError;
pub use frame::{RawFrame, compute_humidity, compute_temperature};
pub use pulse::{Pulse, PulseDurations, expect_pulse};
pub use reading::{ReadOutcome, Reading};
pub use specs::{DHT11_SPECS, Specs};
