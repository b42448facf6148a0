//! Context generation counter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one incarnation of the GPU context behind a surface.
///
/// The initial context is generation 0. Every successful transition out of
/// `Lost` produces a strictly larger generation; values are never reused, so
/// any handle stamped with an older generation is known to be dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ContextGeneration(u64);

impl ContextGeneration {
    /// Generation of the context that exists when the surface is acquired
    pub const INITIAL: Self = Self(0);

    /// Raw counter value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The generation following this one.
    ///
    /// Only the lifecycle manager advances generations.
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ContextGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_strictly_increases() {
        let g0 = ContextGeneration::INITIAL;
        let g1 = g0.next();
        let g2 = g1.next();
        assert!(g1 > g0);
        assert!(g2 > g1);
        assert_eq!(g2.value(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ContextGeneration::INITIAL.next().to_string(), "gen#1");
    }
}
