/// Monotonic millisecond clock used to rate-limit sensor exchanges.
///
/// The counter may wrap around `u32::MAX`; elapsed time is computed with
/// wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since some fixed point, usually boot.
    fn now_ms(&mut self) -> u32;
}

/// Any `FnMut() -> u32` closure works as a clock, e.g.
/// `|| embassy_time::Instant::now().as_millis() as u32`.
impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}
