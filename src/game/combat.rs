//! Combat resolution.
//!
//! An encounter pins one player against the enemy in their zone and runs in
//! exchanges. Each exchange the player strikes or uses an item, then a downed
//! enemy rolls for clearance and a standing one retaliates. Encounter hit
//! points and bonuses are scoped to the encounter; the player's stat line is
//! never written back.

use std::fmt;

use crate::error::ActionError;
use crate::game::{EnemyKind, ItemUse, PlayerId, Session, ZoneRef};

/// Percent chance that a downed enemy is actually cleared from its zone.
const CLEAR_CHANCE: i32 = 50;

/// Damage dealt by a player strike.
///
/// `variance` is the per-strike roll in `[-2, 2]`; a critical doubles the
/// result. Floors at zero, so a strong foe can fully shrug off a hit.
#[must_use]
pub fn strike_damage(
    attack: i32,
    bonus: i32,
    foe_defense: i32,
    variance: i32,
    critical: bool,
) -> i32 {
    let base = (attack + bonus - foe_defense + variance).max(0);
    if critical {
        base * 2
    } else {
        base
    }
}

/// Damage dealt by an enemy retaliation.
///
/// `variance` is the per-hit roll in `[0, 5]`. Floors at one, so an enemy
/// left standing always draws blood.
#[must_use]
pub fn retaliation_damage(foe_attack: i32, defense: i32, bonus: i32, variance: i32) -> i32 {
    (foe_attack - (defense + bonus) + variance).max(1)
}

/// What the player does with their half of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatChoice {
    /// Strike the enemy.
    Attack,
    /// Use the item in a backpack slot.
    UseItem {
        /// Slot index, 0-based.
        slot: usize,
    },
}

/// One step of an exchange, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    /// The player landed a strike.
    Strike {
        /// Damage dealt after the floor and any critical doubling.
        damage: i32,
        /// Whether the strike was a critical hit.
        critical: bool,
        /// Enemy hit points after the strike.
        foe_hp: i32,
    },
    /// The player used an item.
    ItemUsed {
        /// What the item did.
        effect: ItemUse,
    },
    /// The enemy struck back.
    Retaliation {
        /// Damage dealt after the floor.
        damage: i32,
        /// Player hit points after the hit.
        player_hp: i32,
    },
}

/// How an encounter ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterOutcome {
    /// The enemy went down and the clearance roll removed it from the zone.
    FoeCleared,
    /// The enemy went down but recovers: it stays in the zone at full
    /// strength and can be fought again.
    FoeLingers,
    /// The boss went down and was cleared. The session is won.
    BossCleared {
        /// Name of the winning player.
        winner: String,
    },
    /// The player ran out of hit points and is out of the session.
    PlayerSlain {
        /// Whether this was the last player, ending the session in loss.
        total_loss: bool,
    },
}

impl fmt::Display for EncounterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterOutcome::FoeCleared => write!(f, "the enemy is destroyed"),
            EncounterOutcome::FoeLingers => {
                write!(f, "the enemy staggers, then recovers its footing")
            }
            EncounterOutcome::BossCleared { winner } => {
                write!(f, "{winner} has slain the boss")
            }
            EncounterOutcome::PlayerSlain { total_loss } => {
                if *total_loss {
                    write!(f, "slain; no one is left standing")
                } else {
                    write!(f, "slain")
                }
            }
        }
    }
}

/// Everything that happened in one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Events in resolution order.
    pub events: Vec<CombatEvent>,
    /// Set when this exchange ended the encounter.
    pub outcome: Option<EncounterOutcome>,
}

/// A running encounter between one player and one enemy.
///
/// Holds a snapshot of the player's stats taken at `begin`; stat-affecting
/// effects during the encounter land on the bonus fields instead.
#[derive(Debug, Clone)]
pub struct Encounter {
    player: PlayerId,
    zone: ZoneRef,
    foe: EnemyKind,
    foe_hp: i32,
    player_hp: i32,
    attack: i32,
    defense: i32,
    luck: i32,
    attack_bonus: i32,
    defense_bonus: i32,
    outcome: Option<EncounterOutcome>,
}

impl Encounter {
    /// Open an encounter against the enemy in the player's current zone.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::NotInPlay` if the session is over or the player
    /// is gone, and `ActionError::NoEnemy` if the zone holds no enemy on the
    /// player's side.
    pub fn begin(session: &Session, player: PlayerId) -> Result<Self, ActionError> {
        if session.is_over() {
            return Err(ActionError::NotInPlay);
        }
        let state = session.roster.get(player).ok_or(ActionError::NotInPlay)?;
        let zone = ZoneRef {
            world: state.world,
            index: state.position,
        };
        let foe = session
            .map
            .get_pair(zone.index)
            .and_then(|pair| pair.enemy(zone.world))
            .ok_or(ActionError::NoEnemy)?;

        Ok(Self {
            player,
            zone,
            foe,
            foe_hp: foe.stats().hp,
            player_hp: state.stats.combat_hp(),
            attack: state.stats.attack,
            defense: state.stats.defense,
            luck: state.stats.luck,
            attack_bonus: 0,
            defense_bonus: 0,
            outcome: None,
        })
    }

    /// Run one exchange.
    ///
    /// A failed item use (empty slot) costs nothing: the error comes back and
    /// the exchange has not happened. Compass hints and out-of-combat duds
    /// also leave the exchange unspent, so the enemy does not retaliate.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::EncounterOver` once an outcome is set, and
    /// passes through backpack errors from an item choice.
    pub fn exchange(
        &mut self,
        session: &mut Session,
        choice: CombatChoice,
    ) -> Result<ExchangeReport, ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::EncounterOver);
        }

        let mut events = Vec::new();
        let exchange_used;

        match choice {
            CombatChoice::Attack => {
                // Criticals ride on luck: the roll must come in under it.
                let critical = session.rng.roll(0, 20) < self.luck;
                let variance = session.rng.roll(-2, 2);
                let damage = strike_damage(
                    self.attack,
                    self.attack_bonus,
                    self.foe.stats().defense,
                    variance,
                    critical,
                );
                self.foe_hp -= damage;
                events.push(CombatEvent::Strike {
                    damage,
                    critical,
                    foe_hp: self.foe_hp,
                });
                exchange_used = true;
            }
            CombatChoice::UseItem { slot } => {
                let state = session
                    .roster
                    .get_mut(self.player)
                    .ok_or(ActionError::NotInPlay)?;
                let effect = state.inventory.use_slot(slot, true)?;
                match effect {
                    ItemUse::DefenseUp { bonus } => self.defense_bonus += bonus,
                    ItemUse::AttackUp { bonus } => self.attack_bonus += bonus,
                    ItemUse::Recovered { hp } => self.player_hp += hp,
                    ItemUse::BossHint | ItemUse::NoEffect { .. } => {}
                }
                exchange_used = effect.uses_exchange();
                events.push(CombatEvent::ItemUsed { effect });
            }
        }

        if self.foe_hp <= 0 {
            let outcome = self.resolve_downed_foe(session);
            self.outcome = Some(outcome.clone());
            return Ok(ExchangeReport {
                events,
                outcome: Some(outcome),
            });
        }

        if exchange_used {
            let variance = session.rng.roll(0, 5);
            let damage = retaliation_damage(
                self.foe.stats().attack,
                self.defense,
                self.defense_bonus,
                variance,
            );
            self.player_hp -= damage;
            events.push(CombatEvent::Retaliation {
                damage,
                player_hp: self.player_hp,
            });

            if self.player_hp <= 0 {
                let outcome = self.resolve_slain_player(session);
                self.outcome = Some(outcome.clone());
                return Ok(ExchangeReport {
                    events,
                    outcome: Some(outcome),
                });
            }
        }

        Ok(ExchangeReport {
            events,
            outcome: None,
        })
    }

    /// A downed enemy rolls for clearance. On a miss it recovers in place at
    /// full strength; the boss only grants victory when it is cleared.
    fn resolve_downed_foe(&mut self, session: &mut Session) -> EncounterOutcome {
        if session.rng.percent() > CLEAR_CHANCE {
            self.foe_hp = self.foe.stats().hp;
            return EncounterOutcome::FoeLingers;
        }

        if let Some(pair) = session.map.get_pair_mut(self.zone.index) {
            pair.set_enemy(self.zone.world, None);
        }

        if self.foe.is_boss() {
            let winner = session
                .roster
                .get(self.player)
                .map_or_else(String::new, |state| state.name.clone());
            session.record_victory(winner.clone());
            EncounterOutcome::BossCleared { winner }
        } else {
            EncounterOutcome::FoeCleared
        }
    }

    fn resolve_slain_player(&self, session: &mut Session) -> EncounterOutcome {
        session.roster.remove(self.player);
        let total_loss = session.roster.is_empty();
        if total_loss {
            session.record_total_loss();
        }
        EncounterOutcome::PlayerSlain { total_loss }
    }

    /// Whether an outcome has been set.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The outcome, once set.
    #[must_use]
    pub const fn outcome(&self) -> Option<&EncounterOutcome> {
        self.outcome.as_ref()
    }

    /// The player in this encounter.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// The zone the encounter is pinned to.
    #[must_use]
    pub const fn zone(&self) -> ZoneRef {
        self.zone
    }

    /// The enemy being fought.
    #[must_use]
    pub const fn foe(&self) -> EnemyKind {
        self.foe
    }

    /// Enemy hit points remaining.
    #[must_use]
    pub const fn foe_hp(&self) -> i32 {
        self.foe_hp
    }

    /// Player hit points remaining in this encounter.
    #[must_use]
    pub const fn player_hp(&self) -> i32 {
        self.player_hp
    }

    /// Attack bonus accumulated this encounter.
    #[must_use]
    pub const fn attack_bonus(&self) -> i32 {
        self.attack_bonus
    }

    /// Defense bonus accumulated this encounter.
    #[must_use]
    pub const fn defense_bonus(&self) -> i32 {
        self.defense_bonus
    }
}
