use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin, PinState},
};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::DhtError;
use crate::frame::RawFrame;
use crate::pulse::{PulseDurations, expect_pulse};
use crate::reading::{ReadOutcome, Reading};
use crate::specs::{DHT11_SPECS, Specs};

/// Driver for the DHT11 temperature and humidity sensor.
///
/// The data line is driven open-drain: `set_low` pulls it down, `set_high`
/// releases it to the pull-up so the sensor can answer.
pub struct Dht11<PIN: ErrorType, DELAY, CLOCK> {
    pin: PIN,
    delay: DELAY,
    clock: CLOCK,
    config: Config,
    /// Clock value at the start of the last exchange.
    last_read_ms: u32,
    last_success: bool,
    frame: RawFrame,
    last_error: Option<DhtError<PIN::Error>>,
}

impl<PIN, DELAY, CLOCK, E> Dht11<PIN, DELAY, CLOCK>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
    CLOCK: Clock,
{
    /// Creates a new instance of the DHT11 driver with datasheet timings.
    ///
    /// No I/O happens here. Call [`begin`](Self::begin) before the first
    /// [`read`](Self::read).
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - A monotonic millisecond clock.
    pub fn new(pin: PIN, delay: DELAY, clock: CLOCK) -> Self {
        Self::with_config(pin, delay, clock, Config::default())
    }

    /// Creates a new instance of the DHT11 driver with custom timings.
    pub fn with_config(pin: PIN, delay: DELAY, clock: CLOCK, config: Config) -> Self {
        Dht11 {
            pin,
            delay,
            clock,
            config,
            last_read_ms: 0,
            last_success: false,
            frame: RawFrame::EMPTY,
            last_error: None,
        }
    }

    /// Releases the data line and allows the next [`read`](Self::read) to
    /// talk to the sensor right away.
    ///
    /// Safe to call more than once.
    pub fn begin(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_high()?;
        self.last_read_ms = self
            .clock
            .now_ms()
            .wrapping_sub(self.config.min_interval_ms);
        Ok(())
    }

    /// Reads a temperature and humidity measurement from the DHT11 sensor.
    ///
    /// Reads issued within the minimum interval of the previous exchange
    /// repeat its outcome without touching the line. Failures of any kind
    /// yield [`Reading::INVALID`]; see [`last_error`](Self::last_error) for
    /// the cause.
    pub fn read(&mut self) -> Reading {
        self.poll().reading()
    }

    /// Like [`read`](Self::read), but tells whether a new exchange happened.
    pub fn poll(&mut self) -> ReadOutcome {
        let now = self.clock.now_ms();
        let elapsed = now.wrapping_sub(self.last_read_ms);
        if elapsed < self.config.min_interval_ms {
            debug!("dht11: {=u32} ms since last exchange, using cache", elapsed);
            return ReadOutcome::Cached(Reading::from_outcome(&self.frame, self.last_success));
        }

        self.last_read_ms = now;
        match self.transfer() {
            Ok(()) => {
                self.last_success = true;
                self.last_error = None;
            }
            Err(e) => {
                log_failure(&e);
                self.last_success = false;
                self.last_error = Some(e);
            }
        }

        ReadOutcome::Fresh(Reading::from_outcome(&self.frame, self.last_success))
    }

    /// Operating limits of the sensor.
    pub fn specs(&self) -> &'static Specs {
        &DHT11_SPECS
    }

    /// Cause of the last failed exchange, `None` if it succeeded.
    pub fn last_error(&self) -> Option<&DhtError<E>> {
        self.last_error.as_ref()
    }

    /// Destroys the driver and returns the pin, delay and clock.
    pub fn release(self) -> (PIN, DELAY, CLOCK) {
        (self.pin, self.delay, self.clock)
    }

    /// Runs one exchange and leaves the received bytes in `self.frame`.
    ///
    /// The frame is stored even when its checksum is wrong; the caller only
    /// surfaces it on success.
    fn transfer(&mut self) -> Result<(), DhtError<E>> {
        self.frame = RawFrame::EMPTY;
        trace!("dht11: sending start signal");
        self.start()?;

        let max_cycles = self.config.max_pulse_cycles();
        let pin = &mut self.pin;

        // Disable interrupts while measuring so they don't skew the pulse counts
        let durations = critical_section::with(|_cs| -> Result<PulseDurations, DhtError<E>> {
            // Sensor acknowledges with ~80us LOW, then ~80us HIGH
            if expect_pulse(pin, PinState::Low, max_cycles)?.is_timeout()
                || expect_pulse(pin, PinState::High, max_cycles)?.is_timeout()
            {
                return Err(DhtError::Handshake);
            }
            Ok(PulseDurations::capture(pin, max_cycles)?)
        })?;

        self.frame = durations.decode::<E>()?;

        if !self.frame.checksum_valid() {
            return Err(DhtError::ChecksumMismatch {
                expected: self.frame.data_sum(),
                actual: self.frame.checksum(),
            });
        }
        Ok(())
    }

    /// Sends the start signal.
    ///
    /// The line is released for a moment, held low for 20 ms so the sensor
    /// wakes up, then released again and given time to settle.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_high()?;
        self.delay.delay_ms(self.config.wake_ms);

        // MCU sends start request
        self.pin.set_low()?;
        self.delay.delay_ms(self.config.start_signal_ms);
        self.pin.set_high()?;
        self.delay.delay_us(self.config.settle_us);
        Ok(())
    }
}

fn log_failure<E>(error: &DhtError<E>) {
    match error {
        DhtError::Handshake => warn!("dht11: no response to start signal"),
        DhtError::Timeout { bit } => warn!("dht11: pulse timeout at bit {=u8}", *bit),
        DhtError::ChecksumMismatch { expected, actual } => warn!(
            "dht11: checksum mismatch, expected {=u8:#x} got {=u8:#x}",
            *expected,
            *actual
        ),
        DhtError::PinError(_) => warn!("dht11: pin error"),
    }
}
