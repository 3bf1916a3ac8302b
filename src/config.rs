//! Timing parameters of the single-wire exchange.

/// Polling iterations per microsecond assumed by default, sized for a 240 MHz
/// core (ESP32, ESP32-S3). RP2040, RP2350 and ESP32-C3 cores run slower.
pub const DEFAULT_CYCLES_PER_US: u32 = 240;

/// Timing configuration for [`Dht11`](crate::Dht11).
///
/// The defaults match the DHT11 datasheet. `cycles_per_us` converts the pulse
/// timeout from microseconds into iterations of the polling loop, which
/// depends on the host core clock. Its default is an upper bound: a poll takes
/// at least one core cycle, so [`DEFAULT_CYCLES_PER_US`] iterations span at
/// least one microsecond on any core up to that many MHz. Slower hosts only
/// wait longer before giving up on a missing pulse; setting the real rate with
/// [`Config::with_cycles_per_us`] shortens that wait.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Minimum time between two exchanges with the sensor (milliseconds).
    /// Reads issued sooner are served from the cache.
    pub min_interval_ms: u32,
    /// How long the line is released before the start pulse (milliseconds).
    pub wake_ms: u32,
    /// How long the line is held low as start signal (milliseconds).
    pub start_signal_ms: u32,
    /// Settle time after releasing the line (microseconds).
    pub settle_us: u32,
    /// Upper bound for a single pulse (microseconds).
    pub pulse_timeout_us: u32,
    /// Polling loop iterations per microsecond on the host.
    pub cycles_per_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Datasheet timings with a polling rate that suits cores up to 240 MHz.
    pub const fn new() -> Self {
        Self {
            min_interval_ms: 2000,
            wake_ms: 1,
            start_signal_ms: 20,
            settle_us: 55,
            pulse_timeout_us: 1000,
            cycles_per_us: DEFAULT_CYCLES_PER_US,
        }
    }

    /// Returns a copy with the polling rate of the host.
    pub const fn with_cycles_per_us(mut self, cycles_per_us: u32) -> Self {
        self.cycles_per_us = cycles_per_us;
        self
    }

    /// Returns a copy with a different pulse timeout.
    pub const fn with_pulse_timeout_us(mut self, pulse_timeout_us: u32) -> Self {
        self.pulse_timeout_us = pulse_timeout_us;
        self
    }

    /// Returns a copy with a different rate-limit window.
    pub const fn with_min_interval_ms(mut self, min_interval_ms: u32) -> Self {
        self.min_interval_ms = min_interval_ms;
        self
    }

    /// Number of polling iterations after which a pulse counts as timed out.
    pub const fn max_pulse_cycles(&self) -> u32 {
        self.pulse_timeout_us.saturating_mul(self.cycles_per_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_datasheet() {
        let config = Config::default();
        assert_eq!(config.min_interval_ms, 2000);
        assert_eq!(config.start_signal_ms, 20);
        assert_eq!(config.settle_us, 55);
        assert_eq!(config.pulse_timeout_us, 1000);
    }

    #[test]
    fn default_ceiling_spans_the_pulse_timeout_on_fast_cores() {
        // One poll costs at least one core cycle, so at `mhz` the loop runs at
        // most `mhz` iterations per microsecond.
        let ceiling = Config::default().max_pulse_cycles();
        for mhz in [16, 48, 125, 133, 150, 160, 240] {
            assert!(
                ceiling >= 1000 * mhz,
                "ceiling of {ceiling} polls ends before 1000us at {mhz} MHz"
            );
        }
        assert_eq!(ceiling, 240_000);
    }

    #[test]
    fn max_pulse_cycles_scales_and_saturates() {
        assert_eq!(Config::new().with_cycles_per_us(16).max_pulse_cycles(), 16_000);
        assert_eq!(
            Config::new().with_cycles_per_us(u32::MAX).max_pulse_cycles(),
            u32::MAX
        );
        assert_eq!(
            Config::new()
                .with_pulse_timeout_us(2)
                .with_cycles_per_us(3)
                .max_pulse_cycles(),
            6
        );
    }
}
