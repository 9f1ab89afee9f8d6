//! Zone content types shared by both worlds.
//!
//! A zone pair is one arena record: the real-world zone and its mirror-world
//! counterpart at the same index. Terrain is stored once per pair, which makes
//! the identical-terrain invariant structural rather than checked.

/// Which of the two parallel worlds a zone (or a player) is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum World {
    /// The ordinary world. The only place items turn up.
    Real,
    /// The hostile counterpart. Home of the boss.
    Mirror,
}

impl World {
    /// The other world.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Real => Self::Mirror,
            Self::Mirror => Self::Real,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Real => "real world",
            Self::Mirror => "mirror world",
        }
    }
}

/// Terrain category of a zone pair (identical on both sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    /// Dense woods.
    Woods,
    /// The town school.
    School,
    /// A research laboratory.
    Laboratory,
    /// A natural cavern.
    Cavern,
    /// An open street.
    Street,
    /// A suburban garden.
    Garden,
    /// The supermarket.
    Supermarket,
    /// The power plant.
    PowerPlant,
    /// An abandoned depot.
    Depot,
    /// The police station.
    PoliceStation,
}

impl Terrain {
    /// All terrain kinds, in generation order.
    pub const ALL: [Self; 10] = [
        Self::Woods,
        Self::School,
        Self::Laboratory,
        Self::Cavern,
        Self::Street,
        Self::Garden,
        Self::Supermarket,
        Self::PowerPlant,
        Self::Depot,
        Self::PoliceStation,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Woods => "woods",
            Self::School => "school",
            Self::Laboratory => "laboratory",
            Self::Cavern => "cavern",
            Self::Street => "street",
            Self::Garden => "garden",
            Self::Supermarket => "supermarket",
            Self::PowerPlant => "power plant",
            Self::Depot => "depot",
            Self::PoliceStation => "police station",
        }
    }
}

/// Enemy tiers. Fixed scripted stats, no scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Weak tier. Never generated in the mirror world.
    Grunt,
    /// Medium tier. Generated in both worlds.
    Brute,
    /// The unique top-tier enemy. Clearing it wins the game.
    Boss,
}

impl EnemyKind {
    /// Fixed combat stats for this tier.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Grunt => EnemyStats {
                hp: 20,
                attack: 5,
                defense: 2,
            },
            Self::Brute => EnemyStats {
                hp: 40,
                attack: 10,
                defense: 5,
            },
            Self::Boss => EnemyStats {
                hp: 80,
                attack: 15,
                defense: 10,
            },
        }
    }

    /// Whether this is the boss.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Brute => "brute",
            Self::Boss => "boss",
        }
    }
}

/// Stat block for an enemy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStats {
    /// Starting hit points.
    pub hp: i32,
    /// Attack rating used for retaliation.
    pub attack: i32,
    /// Defense rating subtracted from incoming strikes.
    pub defense: i32,
}

/// Collectible items. Only real-world zones ever carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// +5 temporary defense while a fight lasts.
    HellfireShirt,
    /// +10 temporary attack; spent on use.
    MetalRiff,
    /// +10 hp back mid-fight.
    Bicycle,
    /// Points toward the boss.
    Compass,
}

impl ItemKind {
    /// All item kinds, in generation order.
    pub const ALL: [Self; 4] = [
        Self::HellfireShirt,
        Self::MetalRiff,
        Self::Bicycle,
        Self::Compass,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HellfireShirt => "hellfire shirt",
            Self::MetalRiff => "metal riff",
            Self::Bicycle => "bicycle",
            Self::Compass => "compass",
        }
    }
}

/// One arena record: a real-world zone and its mirror counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonePair {
    /// Terrain, identical for both worlds at this index.
    pub terrain: Terrain,
    /// Enemy occupying the real-world side, if any.
    pub real_enemy: Option<EnemyKind>,
    /// Collectible lying on the real-world side, if any.
    pub real_item: Option<ItemKind>,
    /// Enemy occupying the mirror-world side, if any.
    pub mirror_enemy: Option<EnemyKind>,
}

impl ZonePair {
    /// An empty pair: no enemies, no item.
    #[must_use]
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            real_enemy: None,
            real_item: None,
            mirror_enemy: None,
        }
    }

    /// Enemy on the given world's side.
    #[must_use]
    pub const fn enemy(&self, world: World) -> Option<EnemyKind> {
        match world {
            World::Real => self.real_enemy,
            World::Mirror => self.mirror_enemy,
        }
    }

    /// Overwrite the enemy on the given world's side.
    pub fn set_enemy(&mut self, world: World, enemy: Option<EnemyKind>) {
        match world {
            World::Real => self.real_enemy = enemy,
            World::Mirror => self.mirror_enemy = enemy,
        }
    }

    /// What a player standing on the given side can see.
    #[must_use]
    pub const fn view(&self, index: usize, world: World) -> ZoneView {
        ZoneView {
            index,
            world,
            terrain: self.terrain,
            enemy: self.enemy(world),
            item: match world {
                World::Real => self.real_item,
                World::Mirror => None,
            },
        }
    }
}

/// Reference to one side of one zone pair, used for post-combat mutation.
///
/// Carrying the world tag means the combat engine clears exactly the side
/// that was fought, never its mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneRef {
    /// Which world's side.
    pub world: World,
    /// Arena index of the pair.
    pub index: usize,
}

/// Snapshot of one zone side, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneView {
    /// Arena index of the pair.
    pub index: usize,
    /// Which world's side this view shows.
    pub world: World,
    /// Terrain at this index.
    pub terrain: Terrain,
    /// Enemy on this side, if any.
    pub enemy: Option<EnemyKind>,
    /// Item on this side (always `None` in the mirror world).
    pub item: Option<ItemKind>,
}
