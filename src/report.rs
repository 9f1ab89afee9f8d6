//! Plain-text rendering of session state and combat reports.
//!
//! Pure string builders with no I/O; the CLI decides where the text goes.

use crate::game::{
    ActionOutcome, CombatEvent, EnemyKind, ExchangeReport, ItemKind, ItemUse, Outcome, PlayerView,
    WinnersLog, ZoneMap, ZoneView,
};

fn name_or_dash(name: Option<&'static str>) -> &'static str {
    name.unwrap_or("-")
}

/// One-line item effect description.
fn describe_effect(effect: ItemUse) -> String {
    match effect {
        ItemUse::DefenseUp { bonus } => format!("defense +{bonus} for this encounter"),
        ItemUse::AttackUp { bonus } => format!("attack +{bonus} for this encounter"),
        ItemUse::Recovered { hp } => format!("recovered {hp} hp"),
        ItemUse::BossHint => "the compass needle swings toward the boss".to_string(),
        ItemUse::NoEffect { item } => format!("the {} does nothing here", item.name()),
    }
}

/// Render one side of a zone pair.
#[must_use]
pub fn render_zone(view: &ZoneView) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Zone {} ({} world): {}\n",
        view.index,
        view.world.name(),
        view.terrain.name()
    ));
    output.push_str(&format!(
        "  enemy: {}\n",
        name_or_dash(view.enemy.map(EnemyKind::name))
    ));
    output.push_str(&format!(
        "  item:  {}\n",
        name_or_dash(view.item.map(ItemKind::name))
    ));
    output
}

/// Render a player sheet.
#[must_use]
pub fn render_player(view: &PlayerView) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", view.name, view.build.name()));
    output.push_str(&format!(
        "  attack {}  defense {}  luck {}\n",
        view.stats.attack, view.stats.defense, view.stats.luck
    ));
    output.push_str(&format!(
        "  standing in zone {} of the {} world\n",
        view.position,
        view.world.name()
    ));
    output.push_str("  backpack:");
    for (index, slot) in view.inventory.slots().iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {}",
            index + 1,
            name_or_dash(slot.map(ItemKind::name))
        ));
    }
    output.push('\n');
    output
}

/// Render the events of one combat exchange.
#[must_use]
pub fn render_exchange(report: &ExchangeReport) -> String {
    let mut output = String::new();

    for event in &report.events {
        match event {
            CombatEvent::Strike {
                damage,
                critical,
                foe_hp,
            } => {
                let crit = if *critical { " (critical)" } else { "" };
                output.push_str(&format!(
                    "  you strike for {damage}{crit}; the foe is at {} hp\n",
                    (*foe_hp).max(0)
                ));
            }
            CombatEvent::ItemUsed { effect } => {
                output.push_str(&format!("  {}\n", describe_effect(*effect)));
            }
            CombatEvent::Retaliation { damage, player_hp } => {
                output.push_str(&format!(
                    "  the foe strikes back for {damage}; you are at {} hp\n",
                    (*player_hp).max(0)
                ));
            }
        }
    }

    if let Some(outcome) = &report.outcome {
        output.push_str(&format!("  {outcome}\n"));
    }

    output
}

/// Render a non-combat action outcome.
#[must_use]
pub fn render_action(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Moved { zone } | ActionOutcome::Switched { zone } => render_zone(zone),
        ActionOutcome::EscapeFailed { roll, luck } => {
            format!("The rift holds you: rolled {roll} against luck {luck}.\n")
        }
        ActionOutcome::Engaged { encounter } => format!(
            "A {} turns to face you ({} hp).\n",
            encounter.foe().name(),
            encounter.foe_hp()
        ),
        ActionOutcome::PickedUp { item, slot } => format!(
            "Picked up the {} into backpack slot {}.\n",
            item.name(),
            slot + 1
        ),
        ActionOutcome::Used { effect } => format!("{}\n", describe_effect(*effect)),
        ActionOutcome::Player { view } => render_player(view),
        ActionOutcome::Zone { view } => render_zone(view),
        ActionOutcome::Passed => "Turn passed.\n".to_string(),
    }
}

/// Render the session outcome banner.
#[must_use]
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Victory { winner } => {
            format!("{winner} has cleared the boss. The session is won.\n")
        }
        Outcome::TotalLoss => "Every player has fallen. The session is lost.\n".to_string(),
    }
}

/// Render the rolling winners log, padding empty slots with a dash.
#[must_use]
pub fn render_winners(log: &WinnersLog) -> String {
    let mut output = String::new();
    output.push_str("Winners (most recent first)\n");
    for place in 0..WinnersLog::CAPACITY {
        let name = log.entries().get(place).map_or("-", String::as_str);
        output.push_str(&format!("  {}. {name}\n", place + 1));
    }
    output
}

/// Render the full map as a setup listing, one zone pair per line.
#[must_use]
pub fn render_map(map: &ZoneMap) -> String {
    let mut output = String::new();
    let state = if map.is_closed() { "closed" } else { "open" };
    output.push_str(&format!("Map: {} zone pairs ({state})\n", map.len()));

    for (index, pair) in map.iter().enumerate() {
        output.push_str(&format!(
            "  [{index:>2}] {:<14} real: {:<6} {:<14} mirror: {}\n",
            pair.terrain.name(),
            name_or_dash(pair.real_enemy.map(EnemyKind::name)),
            pair.real_item
                .map_or(String::new(), |item| format!("({})", item.name())),
            name_or_dash(pair.mirror_enemy.map(EnemyKind::name)),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        Build, EncounterOutcome, Inventory, Rng, Session, Stats, Terrain, World, MIN_ZONES,
    };

    fn sample_view() -> ZoneView {
        ZoneView {
            index: 3,
            world: World::Real,
            terrain: Terrain::PowerPlant,
            enemy: Some(EnemyKind::Brute),
            item: Some(ItemKind::Compass),
        }
    }

    #[test]
    fn test_zone_rendering_names_everything() {
        let text = render_zone(&sample_view());
        assert!(text.contains("Zone 3"));
        assert!(text.contains("real world"));
        assert!(text.contains("power plant"));
        assert!(text.contains("brute"));
        assert!(text.contains("compass"));
    }

    #[test]
    fn test_zone_rendering_dashes_empty_slots() {
        let view = ZoneView {
            enemy: None,
            item: None,
            ..sample_view()
        };
        let text = render_zone(&view);
        assert!(text.contains("enemy: -"));
        assert!(text.contains("item:  -"));
    }

    #[test]
    fn test_player_rendering_shows_sheet_and_backpack() {
        let mut inventory = Inventory::new();
        inventory.store(ItemKind::Bicycle);
        let view = PlayerView {
            id: 1,
            name: "Aki".into(),
            stats: Stats {
                attack: 12,
                defense: 9,
                luck: 17,
            },
            build: Build::Aggressive,
            inventory,
            world: World::Mirror,
            position: 6,
        };

        let text = render_player(&view);
        assert!(text.contains("Aki (aggressive)"));
        assert!(text.contains("attack 12"));
        assert!(text.contains("luck 17"));
        assert!(text.contains("zone 6 of the mirror world"));
        assert!(text.contains("[1] bicycle"));
        assert!(text.contains("[2] -"));
    }

    #[test]
    fn test_exchange_rendering_clamps_negative_hp() {
        let report = ExchangeReport {
            events: vec![
                CombatEvent::Strike {
                    damage: 9,
                    critical: true,
                    foe_hp: -3,
                },
                CombatEvent::Retaliation {
                    damage: 4,
                    player_hp: 18,
                },
            ],
            outcome: Some(EncounterOutcome::FoeCleared),
        };

        let text = render_exchange(&report);
        assert!(text.contains("strike for 9 (critical)"));
        assert!(text.contains("at 0 hp"));
        assert!(text.contains("strikes back for 4"));
        assert!(text.contains("destroyed"));
    }

    #[test]
    fn test_winners_rendering_pads_to_capacity() {
        let mut log = WinnersLog::new();
        log.record("Aki".into());
        let text = render_winners(&log);
        assert!(text.contains("1. Aki"));
        assert!(text.contains("2. -"));
        assert!(text.contains("3. -"));
    }

    #[test]
    fn test_outcome_banners() {
        let victory = render_outcome(&Outcome::Victory {
            winner: "Bea".into(),
        });
        assert!(victory.contains("Bea"));
        assert!(render_outcome(&Outcome::TotalLoss).contains("lost"));
    }

    #[test]
    fn test_map_listing_covers_every_pair() {
        let mut session = Session::new(9);
        let mut rng = Rng::new(9);
        session.map.generate(&mut rng, MIN_ZONES);
        let text = render_map(&session.map);
        assert!(text.contains(&format!("{MIN_ZONES} zone pairs (open)")));
        assert_eq!(text.lines().count(), MIN_ZONES + 1);

        session.map.close().unwrap();
        assert!(render_map(&session.map).contains("(closed)"));
    }
}
