use crate::card::{Card, EffectKind, EffectSpec};
use crate::config::CombatConfig;
use crate::participant::{CombatParticipant, ParticipantId};
use crate::rng::RngSource;
use crate::state::Roster;

use super::damage::{CasterProfile, conditional_applies, roll_damage, roll_heal};

/// One applied effect on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectResult {
    pub kind: EffectKind,
    /// Damage dealt, hp healed or restored, shield added, buff magnitude,
    /// debuff duration or number of statuses cleansed.
    pub value: u32,
    pub target_id: ParticipantId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub critical: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defeated: bool,
    /// A boss survived the hit by entering its next phase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase_transition: bool,
}

impl EffectResult {
    fn new(kind: EffectKind, value: u32, target_id: ParticipantId) -> Self {
        Self {
            kind,
            value,
            target_id,
            critical: false,
            defeated: false,
            phase_transition: false,
        }
    }
}

/// Applies `card` from `caster` to every id in `targets`, in order.
///
/// Targets that are no longer in the roster are ignored. Damage dealt is
/// credited to the caster once all targets are resolved.
pub fn resolve_card(
    roster: &mut Roster,
    caster: ParticipantId,
    card: &Card,
    targets: &[ParticipantId],
    rng: &mut dyn RngSource,
    config: &CombatConfig,
) -> Vec<EffectResult> {
    let Some(profile) = roster.participant(caster).map(|p| CasterProfile::of(p)) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    let mut dealt = 0u32;
    for &target_id in targets {
        let Some(target) = roster.participant_mut(target_id) else {
            continue;
        };
        dealt = dealt.saturating_add(apply_effects(
            &card.effects,
            &profile,
            target,
            rng,
            config,
            &mut results,
        ));
    }

    if dealt > 0 {
        if let Some(caster) = roster.participant_mut(caster) {
            caster.record_damage_dealt(dealt);
        }
    }
    results
}

/// Fixed order: damage, heal, revive, shield, buff, debuff, cleanse.
///
/// Returns the damage dealt to this target.
fn apply_effects(
    effects: &EffectSpec,
    caster: &CasterProfile,
    target: &mut dyn CombatParticipant,
    rng: &mut dyn RngSource,
    config: &CombatConfig,
    results: &mut Vec<EffectResult>,
) -> u32 {
    let target_id = target.id();
    let mut dealt = 0;

    if let Some(damage) = &effects.damage {
        if !target.is_incapacitated() {
            let bonus = effects
                .conditional
                .filter(|conditional| conditional_applies(conditional, &*target, config))
                .map_or(0, |conditional| conditional.bonus);
            let roll = roll_damage(damage, caster, effects.critical.as_ref(), bonus, rng);
            let report = target.receive_damage(roll.amount, damage.damage_type, config);
            dealt = report.final_amount;

            results.push(EffectResult {
                critical: roll.critical,
                defeated: report.defeated,
                phase_transition: report.phase_transition,
                ..EffectResult::new(EffectKind::Damage, report.final_amount, target_id)
            });
        }
    }

    if let Some(heal) = &effects.heal {
        let report = target.receive_heal(roll_heal(heal, rng));
        if report.healed {
            results.push(EffectResult::new(EffectKind::Heal, report.amount, target_id));
        }
    }

    if let Some(hp_percent) = effects.revive {
        if let Some(hp) = target.revive(hp_percent) {
            results.push(EffectResult::new(EffectKind::Revive, hp, target_id));
        }
    }

    if let Some(amount) = effects.shield {
        if target.add_shield(amount) {
            results.push(EffectResult::new(EffectKind::Shield, amount, target_id));
        }
    }

    if let Some(buff) = effects.buff {
        if target.apply_buff(buff.to_buff()) {
            results.push(EffectResult::new(EffectKind::Buff, buff.magnitude, target_id));
        }
    }

    if let Some(debuff) = effects.debuff {
        if target.apply_status(debuff.to_effect(caster.id)) {
            results.push(EffectResult::new(EffectKind::Debuff, debuff.duration, target_id));
        }
    }

    if effects.cleanse && !target.is_incapacitated() {
        let cleared = target.clear_debuffs();
        results.push(EffectResult::new(
            EffectKind::Cleanse,
            cleared as u32,
            target_id,
        ));
    }

    dealt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{
        BuffSpec, CardEffect, ConditionalSpec, DamageSpec, DebuffSpec, HealSpec, Predicate,
        TargetMode,
    };
    use crate::env::{EnemyTemplate, HeroTemplate, StatBlock};
    use crate::participant::{BuffKind, DamageType, Enemy, Hero, StatusKind};
    use crate::resolver::Dice;
    use crate::rng::ScriptedRng;

    fn roster(enemies: usize) -> Roster {
        let hero = HeroTemplate::new("ranger", "Ranger", "ranger", StatBlock::new(20, 3, 0));
        let enemy = EnemyTemplate::new("wolf", "Wolf", StatBlock::new(10, 2, 2));
        Roster::new(
            vec![
                Hero::from_template(ParticipantId::hero(0), &hero, Vec::new()),
                Hero::from_template(ParticipantId::hero(1), &hero, Vec::new()),
            ],
            (0..enemies)
                .map(|i| Enemy::from_template(ParticipantId::enemy(i), &enemy, None))
                .collect(),
        )
    }

    fn card(mode: TargetMode, effects: &[CardEffect]) -> Card {
        Card::new("test", "ranger", 1, mode, effects).unwrap()
    }

    fn damage(base: u32, dice: Option<Dice>) -> CardEffect {
        CardEffect::Damage(DamageSpec {
            base,
            dice,
            damage_type: DamageType::Physical,
        })
    }

    #[test]
    fn one_die_card_against_defense() {
        let mut roster = roster(1);
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        let strike = card(TargetMode::Enemy, &[damage(0, Some(Dice::new(1, 1, 0)))]);

        // 1d1 + attack 3 - defense 2
        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &strike,
            &[ParticipantId::enemy(0)],
            &mut rng,
            &config,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, EffectKind::Damage);
        assert_eq!(results[0].value, 2);
        assert_eq!(roster.enemies[0].hp(), 8);
        assert_eq!(roster.heroes[0].totals().damage_dealt, 2);
    }

    #[test]
    fn area_card_records_one_result_per_target() {
        let mut roster = roster(3);
        roster.enemies[1].vitals_mut().hp = 1;
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        let volley = card(TargetMode::AllEnemies, &[damage(1, None)]);

        let targets = legal_targets_for(&roster, &volley);
        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &volley,
            &targets,
            &mut rng,
            &config,
        );

        assert_eq!(results.len(), 3);
        let defeated: Vec<bool> = results.iter().map(|r| r.defeated).collect();
        assert_eq!(defeated, vec![false, true, false]);
        assert_eq!(roster.living_enemies().count(), 2);
    }

    fn legal_targets_for(roster: &Roster, card: &Card) -> Vec<ParticipantId> {
        crate::resolver::possible_targets(roster, ParticipantId::hero(0), card)
    }

    #[test]
    fn effects_apply_in_fixed_order() {
        let mut roster = roster(1);
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        roster.heroes[1].vitals_mut().hp = 5;
        roster.heroes[1].apply_status(
            crate::participant::StatusEffect::new(StatusKind::Poisoned, 3).with_periodic_damage(1),
        );

        let blessing = card(
            TargetMode::Ally,
            &[
                CardEffect::Cleanse,
                CardEffect::Buff(BuffSpec {
                    kind: BuffKind::Defense,
                    magnitude: 2,
                    duration: 2,
                }),
                CardEffect::Shield { amount: 4 },
                CardEffect::Heal(HealSpec { base: 3, dice: None }),
            ],
        );

        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &blessing,
            &[ParticipantId::hero(1)],
            &mut rng,
            &config,
        );
        let kinds: Vec<EffectKind> = results.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EffectKind::Heal,
                EffectKind::Shield,
                EffectKind::Buff,
                EffectKind::Cleanse
            ]
        );
        assert_eq!(results[3].value, 1);
        assert_eq!(roster.heroes[1].hp(), 8);
        assert_eq!(roster.heroes[1].shield(), 4);
        assert!(roster.heroes[1].statuses().is_empty());
    }

    #[test]
    fn provoke_records_caster_as_origin() {
        let mut roster = roster(1);
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        let taunt = card(
            TargetMode::Enemy,
            &[CardEffect::Debuff(DebuffSpec::new(StatusKind::Provoked, 2))],
        );

        resolve_card(
            &mut roster,
            ParticipantId::hero(1),
            &taunt,
            &[ParticipantId::enemy(0)],
            &mut rng,
            &config,
        );
        let provoke = roster.enemies[0].statuses().get(StatusKind::Provoked).copied();
        assert_eq!(provoke.and_then(|p| p.origin), Some(ParticipantId::hero(1)));
    }

    #[test]
    fn conditional_checks_target_before_the_hit() {
        let mut roster = roster(1);
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        let execute = card(
            TargetMode::Enemy,
            &[
                damage(0, None),
                CardEffect::Conditional(ConditionalSpec {
                    predicate: Predicate::TargetHpBelowThreshold,
                    bonus: 5,
                }),
            ],
        );

        // 10/10 hp: no bonus, 3 - 2 = 1
        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &execute,
            &[ParticipantId::enemy(0)],
            &mut rng,
            &config,
        );
        assert_eq!(results[0].value, 1);

        // 2/10 hp is below 30%: 3 + 5 - 2 = 6
        roster.enemies[0].vitals_mut().hp = 2;
        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &execute,
            &[ParticipantId::enemy(0)],
            &mut rng,
            &config,
        );
        assert_eq!(results[0].value, 6);
        assert!(results[0].defeated);
    }

    #[test]
    fn revive_brings_back_knocked_out_ally() {
        let mut roster = roster(1);
        let mut rng = ScriptedRng::constant(0);
        let config = CombatConfig::default();
        roster.heroes[1].receive_damage(100, DamageType::Physical, &config);

        let raise = card(
            TargetMode::IncapacitatedAlly,
            &[CardEffect::Revive { hp_percent: 25 }],
        );
        let results = resolve_card(
            &mut roster,
            ParticipantId::hero(0),
            &raise,
            &[ParticipantId::hero(1)],
            &mut rng,
            &config,
        );
        assert_eq!(results[0].kind, EffectKind::Revive);
        assert_eq!(results[0].value, 5);
        assert!(!roster.heroes[1].is_incapacitated());
    }
}
