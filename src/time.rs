use fugit::MicrosDurationU64;

/// Time for sound at `sound_speed` (mm/us) to cover `distance_mm` and come back.
pub fn round_trip(distance_mm: u32, sound_speed: f64) -> MicrosDurationU64 {
    let micros = 2.0 * distance_mm as f64 / sound_speed;
    MicrosDurationU64::from_ticks(micros as u64)
}
