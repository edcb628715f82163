use crate::games::rng::RandomSource;
use crate::games::types::BetOption;

/// Decides win/loss from the bet's configured probability
pub struct OutcomeDecider;

impl OutcomeDecider {
    /// One uniform draw; a win when it falls below `target_probability`
    pub fn decide(rng: &mut dyn RandomSource, option: &BetOption) -> bool {
        rng.next_unit() < option.target_probability
    }
}
