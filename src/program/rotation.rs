//! Rotation tracker - cycles selection contexts through their candidate
//! lists so repeated picks advance instead of repeating

use std::collections::HashMap;

use crate::exercises::{Exercise, Role, TargetArea};

use super::rng::ScoreRng;

/// Selection context. A closed union instead of ad hoc strings, so a typo
/// cannot silently split one rotation into two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    RoleArea { role: Role, area: TargetArea },
    MultiBenefit,
    MultiBenefitFor(TargetArea),
    Universal,
    Support,
    Maintenance,
    Recovery,
}

/// Per-context cursors, scoped to a single generation run
#[derive(Debug, Default)]
pub struct RotationState {
    cursors: HashMap<SelectionKey, usize>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick one candidate for this context.
    ///
    /// Empty list: `None`. Single candidate: returned without consuming
    /// randomness or touching the cursor. Otherwise one draw picks an
    /// offset, the cursor advances by `offset + 1 (mod len)` and
    /// `candidates[(cursor + offset) mod len]` is returned, which covers
    /// every candidate over repeated calls.
    pub fn next(
        &mut self,
        key: SelectionKey,
        candidates: &[&'static Exercise],
        rng: &mut ScoreRng,
    ) -> Option<&'static Exercise> {
        match candidates {
            [] => None,
            [only] => Some(*only),
            _ => {
                let len = candidates.len();
                let cursor = self.cursors.get(&key).copied().unwrap_or(0);
                let offset = rng.pick_index(len);
                self.cursors.insert(key, (cursor + offset + 1) % len);
                Some(candidates[(cursor + offset) % len])
            }
        }
    }
}
