//! Damage strategies - How much damage one character deals another

use crate::character::Character;

/// Every hit deals at least this much damage
pub const MINIMUM_DAMAGE: u32 = 1;

/// Computes damage between two characters from their current stats
///
/// Implementations must be pure: no mutation, no randomness they don't own.
pub trait DamageStrategy: Send + Sync {
    fn calculate_damage(&self, attacker: &Character, defender: &Character) -> u32;
}

/// Physical attack minus defense, never below [`MINIMUM_DAMAGE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalDamage;

impl DamageStrategy for PhysicalDamage {
    fn calculate_damage(&self, attacker: &Character, defender: &Character) -> u32 {
        attacker
            .physical_attack()
            .saturating_sub(defender.stats().defense())
            .max(MINIMUM_DAMAGE)
    }
}

impl<F> DamageStrategy for F
where
    F: Fn(&Character, &Character) -> u32 + Send + Sync,
{
    fn calculate_damage(&self, attacker: &Character, defender: &Character) -> u32 {
        self(attacker, defender)
    }
}
