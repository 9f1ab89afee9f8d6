//! Player state: stats, builds, inventory, roster.
//!
//! Stats are rolled once at creation and never clamped afterwards; build
//! adjustments may push them past the rolled range, and the prodigy build may
//! push luck below zero. Combat works on signed arithmetic throughout.

use std::fmt;

use crate::error::ActionError;
use crate::game::{ItemKind, Rng, World};

/// Unique identifier for a player. Ids start at 1 and are never reused
/// within a session.
pub type PlayerId = u8;

/// Maximum number of players in a session.
pub const MAX_PLAYERS: usize = 4;

/// Number of backpack slots per player.
pub const INVENTORY_SLOTS: usize = 3;

/// Core combat attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Offensive strength.
    pub attack: i32,
    /// Damage mitigation. Also sets combat endurance.
    pub defense: i32,
    /// Rolled against for critical strikes and mirror-world escapes.
    pub luck: i32,
}

impl Stats {
    /// Roll a fresh stat line, each attribute uniform in `[1, 20]`.
    #[must_use]
    pub fn roll(rng: &mut Rng) -> Self {
        Self {
            attack: rng.roll(1, 20),
            defense: rng.roll(1, 20),
            luck: rng.roll(1, 20),
        }
    }

    /// Hit points granted at the start of every encounter.
    #[must_use]
    pub const fn combat_hp(&self) -> i32 {
        2 * self.defense + 20
    }
}

/// Character build chosen at creation. Applied once to the rolled stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Build {
    /// No adjustment.
    Balanced,
    /// +3 attack, -3 defense.
    Aggressive,
    /// -3 attack, +3 defense.
    Guarded,
    /// +4 attack, +4 defense, -7 luck. One per session.
    Prodigy,
}

impl Build {
    /// Apply this build's adjustment to freshly rolled stats.
    #[must_use]
    pub const fn apply(self, stats: Stats) -> Stats {
        match self {
            Build::Balanced => stats,
            Build::Aggressive => Stats {
                attack: stats.attack + 3,
                defense: stats.defense - 3,
                luck: stats.luck,
            },
            Build::Guarded => Stats {
                attack: stats.attack - 3,
                defense: stats.defense + 3,
                luck: stats.luck,
            },
            Build::Prodigy => Stats {
                attack: stats.attack + 4,
                defense: stats.defense + 4,
                luck: stats.luck - 7,
            },
        }
    }

    /// Whether only one player per session may take this build.
    #[must_use]
    pub const fn is_unique(self) -> bool {
        matches!(self, Build::Prodigy)
    }

    /// Rulebook name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Build::Balanced => "balanced",
            Build::Aggressive => "aggressive",
            Build::Guarded => "guarded",
            Build::Prodigy => "prodigy",
        }
    }
}

/// What happened when an item was put to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    /// Defense raised for the rest of the encounter.
    DefenseUp {
        /// Amount added.
        bonus: i32,
    },
    /// Attack raised for the rest of the encounter.
    AttackUp {
        /// Amount added.
        bonus: i32,
    },
    /// Hit points restored.
    Recovered {
        /// Amount healed.
        hp: i32,
    },
    /// The compass pointed out where the boss waits.
    BossHint,
    /// The item does nothing here. Nothing was consumed.
    NoEffect {
        /// The item that stayed put.
        item: ItemKind,
    },
}

impl ItemUse {
    /// Whether this effect costs the combat exchange it was used in.
    #[must_use]
    pub const fn uses_exchange(self) -> bool {
        matches!(
            self,
            ItemUse::DefenseUp { .. } | ItemUse::AttackUp { .. } | ItemUse::Recovered { .. }
        )
    }
}

/// A fixed three-slot backpack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<ItemKind>; INVENTORY_SLOTS],
}

impl Inventory {
    /// An empty backpack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; INVENTORY_SLOTS],
        }
    }

    /// Store `item` in the first free slot, returning the slot index, or
    /// `None` when the backpack is full.
    pub fn store(&mut self, item: ItemKind) -> Option<usize> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(item);
                return Some(index);
            }
        }
        None
    }

    /// The item in `slot`, if any.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<ItemKind> {
        self.slots.get(slot).copied().flatten()
    }

    /// All slots in order.
    #[must_use]
    pub const fn slots(&self) -> [Option<ItemKind>; INVENTORY_SLOTS] {
        self.slots
    }

    /// Whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Whether no slot is free.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The first slot holding `kind`, if any.
    #[must_use]
    pub fn find(&self, kind: ItemKind) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(kind))
    }

    /// Use the item in `slot`. Only the metal riff is ever consumed; every
    /// other item stays in its slot after use.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::NothingToUse` for an empty or out-of-range slot.
    pub fn use_slot(&mut self, slot: usize, in_combat: bool) -> Result<ItemUse, ActionError> {
        let Some(item) = self.slot(slot) else {
            return Err(ActionError::NothingToUse);
        };

        match item {
            // The compass works anywhere and is never spent.
            ItemKind::Compass => Ok(ItemUse::BossHint),
            _ if !in_combat => Ok(ItemUse::NoEffect { item }),
            ItemKind::HellfireShirt => Ok(ItemUse::DefenseUp { bonus: 5 }),
            ItemKind::MetalRiff => {
                self.slots[slot] = None;
                Ok(ItemUse::AttackUp { bonus: 10 })
            }
            ItemKind::Bicycle => Ok(ItemUse::Recovered { hp: 10 }),
        }
    }
}

/// A participant in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable identifier, assigned at creation.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Rolled stats with the build adjustment applied.
    pub stats: Stats,
    /// The build chosen at creation.
    pub build: Build,
    /// Three-slot backpack.
    pub inventory: Inventory,
    /// Which world the player currently stands in.
    pub world: World,
    /// Zone pair index the player currently occupies.
    pub position: usize,
}

impl Player {
    /// Snapshot for display.
    #[must_use]
    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            stats: self.stats,
            build: self.build,
            inventory: self.inventory,
            world: self.world,
            position: self.position,
        }
    }
}

/// Owned snapshot of a player, safe to hold across state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    /// Stable identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current stats.
    pub stats: Stats,
    /// Chosen build.
    pub build: Build,
    /// Backpack contents.
    pub inventory: Inventory,
    /// Current world.
    pub world: World,
    /// Current zone pair index.
    pub position: usize,
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) atk {} def {} luck {}",
            self.name,
            self.build.name(),
            self.stats.attack,
            self.stats.defense,
            self.stats.luck
        )
    }
}

/// The set of players still in the session, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
    next_id: PlayerId,
}

impl Roster {
    /// An empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            players: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a player, returning the assigned id, or `None` at capacity.
    pub fn add(&mut self, name: String, stats: Stats, build: Build) -> Option<PlayerId> {
        if self.players.len() >= MAX_PLAYERS {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.players.push(Player {
            id,
            name,
            stats,
            build,
            inventory: Inventory::new(),
            world: World::Real,
            position: 0,
        });
        Some(id)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    /// Remove a player (slain in combat), returning them if present.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|player| player.id == id)?;
        Some(self.players.remove(index))
    }

    /// Whether a player with `id` is still in the session.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Ids of all players, in creation order.
    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|player| player.id).collect()
    }

    /// Number of players still in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no players remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate over players in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    /// Drop all players and reset id assignment.
    pub fn clear(&mut self) {
        self.players.clear();
        self.next_id = 1;
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
