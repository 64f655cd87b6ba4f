use crate::random::RandomSource;

// Fixed until moves and combatants carry types.
pub const SAME_TYPE_BONUS: u64 = 1;
pub const TYPE_MODIFIER: u64 = 10;
pub const TYPE_MODIFIER_SCALE: u64 = 10;
pub const VARIANCE_MIN: u32 = 217;
pub const VARIANCE_MAX: u32 = 255;

pub fn calculate_damage<R: RandomSource + ?Sized>(
    attacker_level: u32,
    attacker_attack: u32,
    move_damage: u32,
    defender_defence: u32,
    random: &mut R,
) -> u32 {
    let base = base_damage(attacker_level, attacker_attack, move_damage, defender_defence);
    let random_factor = random.roll(VARIANCE_MIN, VARIANCE_MAX);
    apply_variance(base, random_factor)
}

pub fn base_damage(
    attacker_level: u32,
    attacker_attack: u32,
    move_damage: u32,
    defender_defence: u32,
) -> u64 {
    let level = attacker_level as u64;
    let attack = attacker_attack as u64;
    let power = move_damage as u64;
    // Zero defence would divide by zero.
    let defence = defender_defence.max(1) as u64;

    // Truncates after every step.
    let step1 = 2 * level / 5 + 2;
    let step2 = step1.saturating_mul(attack).saturating_mul(power) / defence;
    let step3 = step2 / 50 + 2;
    step3.saturating_mul(SAME_TYPE_BONUS).saturating_mul(TYPE_MODIFIER) / TYPE_MODIFIER_SCALE
}

fn apply_variance(base: u64, random_factor: u32) -> u32 {
    let scaled = base.saturating_mul(random_factor as u64) / VARIANCE_MAX as u64;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

pub fn damage_range(
    attacker_level: u32,
    attacker_attack: u32,
    move_damage: u32,
    defender_defence: u32,
) -> (u32, u32) {
    let base = base_damage(attacker_level, attacker_attack, move_damage, defender_defence);
    (
        apply_variance(base, VARIANCE_MIN),
        apply_variance(base, VARIANCE_MAX),
    )
}
