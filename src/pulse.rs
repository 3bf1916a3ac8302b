//! Pulse measurement and bit decoding.
//!
//! Every data bit is sent as a LOW pulse followed by a HIGH pulse. The LOW
//! part has a fixed length of about 50us, the HIGH part lasts ~27us for a `0`
//! and ~70us for a `1`. Comparing the two durations of the same bit decides
//! its value, so the loop counts never need to be converted to real time.

use embedded_hal::digital::{InputPin, PinState};

use crate::error::DhtError;
use crate::frame::RawFrame;

/// Number of data bits in one frame.
pub const DATA_BITS: usize = 40;

/// Number of pulses captured for one frame (one LOW and one HIGH per bit).
pub const PULSE_COUNT: usize = DATA_BITS * 2;

/// Duration of a single pulse, counted in polling loop iterations.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// The line changed level after this many iterations.
    Cycles(u32),
    /// The line did not change level within the allotted iterations.
    Timeout,
}

impl Pulse {
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Pulse::Timeout)
    }
}

/// Measures how long the line stays at `level`.
///
/// Busy-polls the pin and counts iterations until the level changes. Once the
/// count reaches `max_cycles` the wait is abandoned and [`Pulse::Timeout`] is
/// returned, so the pin is sampled at most `max_cycles + 1` times.
pub fn expect_pulse<P>(pin: &mut P, level: PinState, max_cycles: u32) -> Result<Pulse, P::Error>
where
    P: InputPin,
{
    let mut count: u32 = 0;
    while is_at_level(pin, level)? {
        if count >= max_cycles {
            return Ok(Pulse::Timeout);
        }
        count += 1;
    }
    Ok(Pulse::Cycles(count))
}

fn is_at_level<P: InputPin>(pin: &mut P, level: PinState) -> Result<bool, P::Error> {
    match level {
        PinState::High => pin.is_high(),
        PinState::Low => pin.is_low(),
    }
}

/// The 80 pulse durations of one exchange.
///
/// Index `2 * i` holds the LOW pulse of bit `i`, index `2 * i + 1` the HIGH
/// pulse that follows it.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseDurations([Pulse; PULSE_COUNT]);

impl Default for PulseDurations {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseDurations {
    /// Every slot starts out as [`Pulse::Timeout`].
    pub const fn new() -> Self {
        PulseDurations([Pulse::Timeout; PULSE_COUNT])
    }

    /// Captures 40 LOW/HIGH pulse pairs from the line.
    ///
    /// A timed out pulse does not stop the capture; it is kept as
    /// [`Pulse::Timeout`] and rejected later by [`decode`](Self::decode).
    pub fn capture<P: InputPin>(pin: &mut P, max_cycles: u32) -> Result<Self, P::Error> {
        let mut durations = Self::new();
        for pair in durations.0.chunks_exact_mut(2) {
            pair[0] = expect_pulse(pin, PinState::Low, max_cycles)?;
            pair[1] = expect_pulse(pin, PinState::High, max_cycles)?;
        }
        Ok(durations)
    }

    /// Records the LOW and HIGH durations of `bit`.
    #[cfg(test)]
    pub(crate) fn set_bit(&mut self, bit: usize, low: Pulse, high: Pulse) {
        self.0[2 * bit] = low;
        self.0[2 * bit + 1] = high;
    }

    /// LOW and HIGH durations of `bit`.
    #[cfg(test)]
    pub(crate) fn bit(&self, bit: usize) -> (Pulse, Pulse) {
        (self.0[2 * bit], self.0[2 * bit + 1])
    }

    /// Packs the 40 bits into a frame, most significant bit first.
    ///
    /// A bit is `1` when its HIGH pulse outlasted its LOW pulse. If any pulse
    /// timed out the whole frame is discarded. The checksum is not checked
    /// here.
    pub fn decode<E>(&self) -> Result<RawFrame, DhtError<E>> {
        let mut frame = RawFrame::EMPTY;
        for (i, pair) in self.0.chunks_exact(2).enumerate() {
            match (pair[0], pair[1]) {
                (Pulse::Cycles(low), Pulse::Cycles(high)) => frame.push_bit(i, high > low),
                _ => return Err(DhtError::Timeout { bit: i as u8 }),
            }
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinLevel, Transaction as PinTx,
    };

    // Durations for a 0-bit (short HIGH) and a 1-bit (long HIGH)
    const ZERO: (Pulse, Pulse) = (Pulse::Cycles(50), Pulse::Cycles(27));
    const ONE: (Pulse, Pulse) = (Pulse::Cycles(50), Pulse::Cycles(70));

    fn durations_for(bytes: [u8; 5]) -> PulseDurations {
        let mut durations = PulseDurations::new();
        for i in 0..DATA_BITS {
            let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
            let (low, high) = if bit == 1 { ONE } else { ZERO };
            durations.set_bit(i, low, high);
        }
        durations
    }

    #[test]
    fn test_expect_pulse_counts_iterations() {
        let mut pin = PinMock::new(&[
            PinTx::get(PinLevel::High),
            PinTx::get(PinLevel::High),
            PinTx::get(PinLevel::High),
            PinTx::get(PinLevel::Low),
        ]);

        let pulse = expect_pulse(&mut pin, PinState::High, 10).unwrap();
        assert_eq!(pulse, Pulse::Cycles(3));

        pin.done();
    }

    #[test]
    fn test_expect_pulse_immediate_change() {
        let mut pin = PinMock::new(&[PinTx::get(PinLevel::High)]);

        let pulse = expect_pulse(&mut pin, PinState::Low, 10).unwrap();
        assert_eq!(pulse, Pulse::Cycles(0));

        pin.done();
    }

    #[test]
    fn test_expect_pulse_stops_at_ceiling() {
        // The line never changes: exactly max_cycles + 1 samples, then timeout.
        let max_cycles = 4;
        let expects: Vec<PinTx> = (0..=max_cycles).map(|_| PinTx::get(PinLevel::Low)).collect();
        let mut pin = PinMock::new(&expects);

        let pulse = expect_pulse(&mut pin, PinState::Low, max_cycles).unwrap();
        assert!(pulse.is_timeout());

        // Would panic inside the mock if the timer had sampled once more.
        pin.done();
    }

    #[test]
    fn test_expect_pulse_changes_on_last_sample() {
        let max_cycles = 4;
        let mut expects: Vec<PinTx> = (0..max_cycles).map(|_| PinTx::get(PinLevel::Low)).collect();
        expects.push(PinTx::get(PinLevel::High));
        let mut pin = PinMock::new(&expects);

        let pulse = expect_pulse(&mut pin, PinState::Low, max_cycles).unwrap();
        assert_eq!(pulse, Pulse::Cycles(max_cycles));

        pin.done();
    }

    #[test]
    fn test_capture_records_low_then_high() {
        let mut expects = vec![];
        for _ in 0..DATA_BITS {
            expects.extend_from_slice(&[
                PinTx::get(PinLevel::Low),
                PinTx::get(PinLevel::Low),
                PinTx::get(PinLevel::High), // end of LOW pulse
                PinTx::get(PinLevel::High),
                PinTx::get(PinLevel::Low), // end of HIGH pulse
            ]);
        }
        let mut pin = PinMock::new(&expects);

        let durations = PulseDurations::capture(&mut pin, 10).unwrap();
        for i in 0..DATA_BITS {
            assert_eq!(durations.bit(i), (Pulse::Cycles(2), Pulse::Cycles(1)));
        }

        pin.done();
    }

    #[test]
    fn test_decode_relative_comparison() {
        let frame = durations_for([45, 0, 25, 0, 70]).decode::<()>().unwrap();
        assert_eq!(frame.bytes(), [45, 0, 25, 0, 70]);
    }

    #[test]
    fn test_decode_equal_durations_is_zero() {
        let mut durations = durations_for([0xFF; 5]);
        durations.set_bit(0, Pulse::Cycles(40), Pulse::Cycles(40));
        let frame = durations.decode::<()>().unwrap();
        assert_eq!(frame.bytes()[0], 0x7F);
    }

    #[test]
    fn test_decode_rejects_any_timeout() {
        let mut durations = durations_for([45, 0, 25, 0, 70]);
        durations.set_bit(39, Pulse::Cycles(50), Pulse::Timeout);
        assert_eq!(
            durations.decode::<()>().unwrap_err(),
            DhtError::Timeout { bit: 39 }
        );

        let mut durations = durations_for([45, 0, 25, 0, 70]);
        durations.set_bit(3, Pulse::Timeout, Pulse::Cycles(27));
        assert_eq!(
            durations.decode::<()>().unwrap_err(),
            DhtError::Timeout { bit: 3 }
        );
    }

    #[test]
    fn test_decode_does_not_check_checksum() {
        let frame = durations_for([45, 0, 25, 0, 71]).decode::<()>().unwrap();
        assert!(!frame.checksum_valid());
    }
}
