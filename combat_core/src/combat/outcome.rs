//! Outcomes of combat actions

/// Why an action was refused
///
/// A rejected action changes nothing and does not use up the actor's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The acting character has no hp left
    ActorDown,
    /// The opponent is already defeated
    TargetDown,
    InsufficientMana { required: u32, available: u32 },
    NoSuchSkill { index: usize },
    NoSuchItem { index: usize },
    /// The encounter has already ended
    EncounterOver,
}

/// Result of one action taken through the combat service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action happened and both sides are still standing
    Resolved,
    /// The action knocked out its target
    TargetDefeated,
    /// The hero left the fight
    Escaped,
    Rejected(Rejection),
}

impl ActionOutcome {
    /// Whether the actor's turn is spent
    pub fn consumed_turn(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected(_))
    }
}

/// State of a single hero-versus-monster encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterState {
    #[default]
    Ongoing,
    HeroVictory,
    HeroDefeat,
    Fled,
}

impl EncounterState {
    pub fn is_over(&self) -> bool {
        *self != EncounterState::Ongoing
    }
}
