use core::fmt;

/// Possible errors from the DHT11 driver.
///
/// [`Dht11::read`](crate::Dht11::read) folds every variant into an invalid
/// [`Reading`](crate::Reading); the error itself stays available through
/// [`Dht11::last_error`](crate::Dht11::last_error).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The sensor did not acknowledge the start signal.
    Handshake,
    /// Timed out waiting for a pulse of the given data bit (0..40).
    Timeout {
        /// Index of the first bit with a missing pulse.
        bit: u8,
    },
    /// Checksum did not match the received data.
    ChecksumMismatch {
        /// Wrapping sum of the four data bytes.
        expected: u8,
        /// Checksum byte sent by the sensor.
        actual: u8,
    },
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DhtError::Handshake => write!(f, "sensor did not acknowledge the start signal"),
            DhtError::Timeout { bit } => write!(f, "timed out waiting for a pulse of bit {bit}"),
            DhtError::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: expected {expected:#04x}, received {actual:#04x}"
            ),
            DhtError::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}
