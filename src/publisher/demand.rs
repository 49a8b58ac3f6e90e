use crate::prelude::*;

/// How many values a subscriber asks for. A request never produces more than
/// one value, so any non-zero demand starts it.
#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demand {
    Unlimited,
    Max { count: u64 },
}

impl Demand {
    pub fn is_zero(&self) -> bool {
        matches!(self, Demand::Max { count: 0 })
    }
}
