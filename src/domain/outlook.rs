use rand::Rng;

pub const MIN_SCORE: u8 = 50;
pub const MAX_SCORE: u8 = 100;

/// Twelve independent scores, one per month, each uniform in 50..=100.
pub fn generate_monthly_scores<R: Rng + ?Sized>(rng: &mut R) -> [u8; 12] {
    std::array::from_fn(|_| rng.gen_range(MIN_SCORE..=MAX_SCORE))
}

pub fn star_count(score: u8) -> usize {
    usize::from(score / 20)
}

pub fn stars(score: u8) -> String {
    "⭐".repeat(star_count(score))
}
