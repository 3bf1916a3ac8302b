//! The 5-byte frame sent by the sensor and its conversion to physical values.

/// Number of bytes in one sensor frame.
pub const FRAME_BYTES: usize = 5;

/// Raw data of one exchange: humidity, temperature and checksum bytes.
///
/// | byte | content |
/// |------|---------|
/// | 0 | humidity, integer part |
/// | 1 | humidity, tenths (always 0 on the DHT11) |
/// | 2 | temperature, integer part |
/// | 3 | temperature tenths in the low nibble, sign in bit 7 |
/// | 4 | checksum |
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFrame([u8; FRAME_BYTES]);

impl RawFrame {
    /// All-zero frame.
    pub const EMPTY: RawFrame = RawFrame([0; FRAME_BYTES]);

    pub const fn new(bytes: [u8; FRAME_BYTES]) -> Self {
        RawFrame(bytes)
    }

    pub const fn bytes(&self) -> [u8; FRAME_BYTES] {
        self.0
    }

    /// Checksum byte as received.
    pub const fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// 8-bit wrapping sum of the four data bytes.
    pub fn data_sum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Whether the checksum byte matches the data bytes.
    pub fn checksum_valid(&self) -> bool {
        self.data_sum() == self.checksum()
    }

    /// Shifts `bit` into byte `index`, most significant bit first.
    pub(crate) fn push_bit(&mut self, index: usize, bit: bool) {
        let byte = &mut self.0[index / 8];
        *byte <<= 1;
        if bit {
            *byte |= 1;
        }
    }
}

/// Temperature in degrees Celsius.
///
/// A set bit 7 in byte 3 marks a negative value, encoded as `-1 - byte[2]`.
/// The tenths nibble is added afterwards, so `[_, _, 0, 0x85, _]` reads as
/// `-0.5`.
pub fn compute_temperature(frame: &RawFrame) -> f32 {
    let [_, _, integral, fraction, _] = frame.bytes();

    let mut temperature = integral as f32;
    if fraction & 0x80 != 0 {
        temperature = -1.0 - temperature;
    }
    temperature + (fraction & 0x0F) as f32 * 0.1
}

/// Relative humidity in percent.
pub fn compute_humidity(frame: &RawFrame) -> f32 {
    let [integral, fraction, _, _, _] = frame.bytes();
    integral as f32 + fraction as f32 * 0.1
}
