//! Interactive play command implementation.
//!
//! Drives a full session from the terminal: the map setup menu, character
//! creation, the round loop with its numbered action menu, and the combat
//! sub-menu per exchange. All game semantics live in the library; this file
//! only prompts, parses, and prints.

use super::records::HallOfFame;
use super::{clock_seed, CliError};
use riftline::game::{
    perform, turn_active, Action, ActionOutcome, Build, CombatChoice, Encounter, EnemyKind,
    ItemKind, Outcome, PlayerId, Session, Terrain, TurnState, World, ZonePair, INVENTORY_SLOTS,
    MAX_PLAYERS,
};
use riftline::report;
use std::io::{self, Write};
use std::path::Path;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error when input closes, the hall of fame file is unusable,
/// or the session cannot start.
pub(crate) fn execute(
    seed: Option<u64>,
    zones: usize,
    records: Option<&Path>,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(clock_seed);
    println!("Riftline session (seed {base_seed})");

    let mut hall = match records {
        Some(path) => HallOfFame::load(path)?,
        None => HallOfFame::default(),
    };
    let mut session = Session::new(base_seed);

    loop {
        set_up_map(&mut session, zones)?;
        create_players(&mut session)?;
        session.start()?;
        run_rounds(&mut session)?;

        println!();
        match session.outcome() {
            Some(outcome @ Outcome::Victory { winner }) => {
                print!("{}", report::render_outcome(outcome));
                hall.record(winner);
                if let Some(path) = records {
                    hall.save(path)?;
                    println!("Hall of fame saved to {}.", path.display());
                }
            }
            Some(outcome) => print!("{}", report::render_outcome(outcome)),
            None => {}
        }
        print!("{}", hall.render());

        let again = read_line("Play again? [y/N]: ")?;
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        session.reset();
    }
}

// ==================== INPUT HELPERS ====================

/// Prompt and read one trimmed line. Closed input is an error rather than
/// an endless empty-line loop.
fn read_line(prompt: &str) -> Result<String, CliError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(CliError::new("input closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt until the user enters a number in `[1, max]`.
fn read_choice(prompt: &str, max: usize) -> Result<usize, CliError> {
    loop {
        let line = read_line(prompt)?;
        match line.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n),
            _ => println!("Enter a number between 1 and {max}."),
        }
    }
}

/// Prompt until the user enters a number in `[0, max]`.
fn read_number(prompt: &str, max: usize) -> Result<usize, CliError> {
    loop {
        let line = read_line(prompt)?;
        match line.parse::<usize>() {
            Ok(n) if n <= max => return Ok(n),
            _ => println!("Enter a number between 0 and {max}."),
        }
    }
}

// ==================== SESSION SETUP ====================

fn create_players(session: &mut Session) -> Result<(), CliError> {
    println!();
    let count = read_choice("Players (1-4): ", MAX_PLAYERS)?;

    for slot in 1..=count {
        let name = loop {
            let name = read_line(&format!("Name for player {slot}: "))?;
            if name.is_empty() {
                println!("A name is required.");
            } else {
                break name;
            }
        };

        loop {
            let prodigy_note = if session.prodigy_claimed() {
                " (taken)"
            } else {
                ""
            };
            println!("Build: 1) balanced 2) aggressive 3) guarded 4) prodigy{prodigy_note}");
            let build = match read_choice("Choice: ", 4)? {
                1 => Build::Balanced,
                2 => Build::Aggressive,
                3 => Build::Guarded,
                _ => Build::Prodigy,
            };
            match session.create_player(name.clone(), build) {
                Ok(id) => {
                    if let Some(state) = session.roster.get(id) {
                        print!("{}", report::render_player(&state.view()));
                    }
                    break;
                }
                Err(e) => println!("{e}"),
            }
        }
    }
    Ok(())
}

fn set_up_map(session: &mut Session, zones: usize) -> Result<(), CliError> {
    session.map.generate(&mut session.rng, zones);
    println!();
    println!("Generated {} zone pairs.", session.map.len());

    loop {
        println!();
        println!("Map setup: 1) generate 2) insert zone 3) delete zone 4) list");
        println!("           5) inspect zone 6) close and play");
        match read_choice("Choice: ", 6)? {
            1 => {
                session.map.generate(&mut session.rng, zones);
                println!("Generated {} zone pairs.", session.map.len());
            }
            2 => insert_zone(session)?,
            3 => delete_zone(session)?,
            4 => print!("{}", report::render_map(&session.map)),
            5 => inspect_zone(session)?,
            _ => match session.map.close() {
                Ok(()) => return Ok(()),
                Err(e) => println!("{e}"),
            },
        }
    }
}

fn insert_zone(session: &mut Session) -> Result<(), CliError> {
    let len = session.map.len();
    let index = read_number(&format!("Insert at [0-{len}]: "), len)?;
    let terrain = choose_terrain()?;

    let mut pair = ZonePair::new(terrain);
    pair.real_enemy = choose_real_enemy()?;
    pair.mirror_enemy = choose_mirror_enemy()?;
    pair.real_item = choose_item()?;

    match session.map.insert_at(index, pair) {
        Ok(()) => println!("Inserted zone pair at {index}."),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn delete_zone(session: &mut Session) -> Result<(), CliError> {
    if session.map.is_empty() {
        println!("The map is empty.");
        return Ok(());
    }
    let index = read_number("Delete index: ", session.map.len() - 1)?;
    match session.map.delete_at(index) {
        Ok(_) => println!("Deleted zone pair {index}."),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn inspect_zone(session: &Session) -> Result<(), CliError> {
    if session.map.is_empty() {
        println!("The map is empty.");
        return Ok(());
    }
    let index = read_number("Zone index: ", session.map.len() - 1)?;
    for world in [World::Real, World::Mirror] {
        if let Some(view) = session.map.view(index, world) {
            print!("{}", report::render_zone(&view));
        }
    }
    Ok(())
}

fn choose_terrain() -> Result<Terrain, CliError> {
    for (index, terrain) in Terrain::ALL.iter().enumerate() {
        println!("  {}) {}", index + 1, terrain.name());
    }
    let choice = read_choice("Terrain: ", Terrain::ALL.len())?;
    Ok(Terrain::ALL[choice - 1])
}

fn choose_real_enemy() -> Result<Option<EnemyKind>, CliError> {
    println!("  1) none 2) grunt 3) brute");
    Ok(match read_choice("Real enemy: ", 3)? {
        1 => None,
        2 => Some(EnemyKind::Grunt),
        _ => Some(EnemyKind::Brute),
    })
}

fn choose_mirror_enemy() -> Result<Option<EnemyKind>, CliError> {
    println!("  1) none 2) brute 3) boss");
    Ok(match read_choice("Mirror enemy: ", 3)? {
        1 => None,
        2 => Some(EnemyKind::Brute),
        _ => Some(EnemyKind::Boss),
    })
}

fn choose_item() -> Result<Option<ItemKind>, CliError> {
    println!("  1) none 2) hellfire shirt 3) metal riff 4) bicycle 5) compass");
    Ok(match read_choice("Real item: ", 5)? {
        1 => None,
        2 => Some(ItemKind::HellfireShirt),
        3 => Some(ItemKind::MetalRiff),
        4 => Some(ItemKind::Bicycle),
        _ => Some(ItemKind::Compass),
    })
}

// ==================== THE ROUND LOOP ====================

fn run_rounds(session: &mut Session) -> Result<(), CliError> {
    let mut round = 0u32;
    while !session.is_over() {
        round += 1;
        println!();
        println!("=== Round {round} ===");
        for id in session.round_order() {
            if !turn_active(session, id) {
                continue;
            }
            take_turn(session, id)?;
            if session.is_over() {
                break;
            }
        }
    }
    Ok(())
}

fn take_turn(session: &mut Session, id: PlayerId) -> Result<(), CliError> {
    let name = session
        .roster
        .get(id)
        .map_or_else(String::new, |state| state.name.clone());
    println!();
    println!("--- {name}'s turn ---");

    let mut turn = TurnState::new();
    loop {
        if !turn_active(session, id) {
            return Ok(());
        }
        if let Some(state) = session.roster.get(id)
            && let Some(view) = session.map.view(state.position, state.world)
        {
            print!("{}", report::render_zone(&view));
        }

        println!("1) advance 2) retreat 3) switch world 4) fight 5) pick up");
        println!("6) use item 7) player info 8) zone info 9) pass");
        let action = match read_choice("Action: ", 9)? {
            1 => Action::Advance,
            2 => Action::Retreat,
            3 => Action::SwitchWorld,
            4 => Action::Fight,
            5 => Action::PickUp,
            6 => {
                let slot = read_choice("Slot (1-3): ", INVENTORY_SLOTS)?;
                Action::UseItem { slot: slot - 1 }
            }
            7 => Action::PlayerInfo,
            8 => Action::ZoneInfo,
            _ => Action::Pass,
        };

        match perform(session, &mut turn, id, action) {
            Ok(ActionOutcome::Engaged { encounter }) => run_encounter(session, encounter)?,
            Ok(ActionOutcome::Passed) => return Ok(()),
            Ok(outcome) => print!("{}", report::render_action(&outcome)),
            Err(e) => println!("{e}"),
        }
    }
}

fn run_encounter(session: &mut Session, mut encounter: Encounter) -> Result<(), CliError> {
    println!(
        "You face the {} ({} hp).",
        encounter.foe().name(),
        encounter.foe_hp()
    );

    while !encounter.is_over() {
        println!(
            "Your hp: {}  Foe hp: {}",
            encounter.player_hp(),
            encounter.foe_hp()
        );
        println!("1) psychic attack 2) use item");
        let choice = match read_choice("Exchange: ", 2)? {
            1 => CombatChoice::Attack,
            _ => {
                let slot = read_choice("Slot (1-3): ", INVENTORY_SLOTS)?;
                CombatChoice::UseItem { slot: slot - 1 }
            }
        };

        match encounter.exchange(session, choice) {
            Ok(exchange) => print!("{}", report::render_exchange(&exchange)),
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
