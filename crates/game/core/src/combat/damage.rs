//! Damage application.

/// Apply damage to current health.
///
/// # Arguments
///
/// * `current` - Current health value
/// * `damage` - Damage to apply
///
/// # Returns
///
/// New health value (clamped to 0)
pub fn apply_damage(current: u32, damage: u32) -> u32 {
    current.saturating_sub(damage)
}

/// Health bar fill for the HUD, in `0.0..=1.0`.
///
/// A zero maximum is treated as an empty bar.
pub fn health_fraction(current: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (current.min(max) as f32) / (max as f32)
}
