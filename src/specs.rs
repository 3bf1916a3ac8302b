/// Operating limits of a sensor model.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Specs {
    /// Sensor model name.
    pub name: &'static str,
    /// Lowest measurable temperature (°C).
    pub temp_min: f32,
    /// Highest measurable temperature (°C).
    pub temp_max: f32,
    /// Temperature resolution (°C).
    pub temp_res: f32,
    /// Lowest measurable relative humidity (%).
    pub hum_min: f32,
    /// Highest measurable relative humidity (%).
    pub hum_max: f32,
    /// Humidity resolution (%).
    pub hum_res: f32,
    /// Minimum delay between two measurements (ms).
    pub min_delay_ms: u32,
}

/// Datasheet limits of the DHT11.
pub const DHT11_SPECS: Specs = Specs {
    name: "DHT11",
    temp_min: 0.0,
    temp_max: 50.0,
    temp_res: 2.0,
    hum_min: 20.0,
    hum_max: 80.0,
    hum_res: 5.0,
    min_delay_ms: 1000,
};
