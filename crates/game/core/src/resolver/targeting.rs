use crate::card::{Card, TargetMode};
use crate::participant::ParticipantId;
use crate::state::Roster;

/// Checks whether `target` may receive a card with `mode` cast by `caster`.
///
/// Allies are participants on the caster's side; the caster counts as its
/// own ally.
pub fn is_legal_target(
    roster: &Roster,
    caster: ParticipantId,
    mode: TargetMode,
    target: ParticipantId,
) -> bool {
    let (Some(caster), Some(target)) = (roster.participant(caster), roster.participant(target))
    else {
        return false;
    };

    let same_side = caster.side() == target.side();
    let standing = !target.is_incapacitated();

    match mode {
        TargetMode::SelfOnly => caster.id() == target.id(),
        TargetMode::Ally | TargetMode::AllAllies => same_side && standing,
        TargetMode::IncapacitatedAlly => same_side && !standing,
        TargetMode::Enemy | TargetMode::AllEnemies => !same_side && standing,
    }
}

/// Every legal target for `mode`, in roster order.
///
/// Defined as the roster filtered by [`is_legal_target`], so the two can
/// never disagree.
pub fn legal_targets(roster: &Roster, caster: ParticipantId, mode: TargetMode) -> Vec<ParticipantId> {
    roster
        .ids()
        .filter(|&id| is_legal_target(roster, caster, mode, id))
        .collect()
}

pub fn possible_targets(roster: &Roster, caster: ParticipantId, card: &Card) -> Vec<ParticipantId> {
    legal_targets(roster, caster, card.target_mode)
}
