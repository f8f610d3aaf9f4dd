//! # CLI Command Implementations

use crate::config::Config;
use crate::session::{CareAction, PetSession};
use pokecare_core::{
    Creature, CreatureId, EvolutionOutcome, PetError, Stage, StorageBackend, TracingCues,
};
use std::path::Path;

/// The session type every command runs against.
pub type CliSession = PetSession<StorageBackend, TracingCues>;

/// Where a selection command moves.
#[derive(Debug, Clone, Copy)]
pub enum Nav<'a> {
    To(&'a str),
    Next,
    Previous,
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn creature_json(creature: &Creature) -> serde_json::Value {
    serde_json::to_value(creature).unwrap_or_default()
}

fn print_evolution(creature: &Creature, outcome: &EvolutionOutcome) {
    if outcome.has_evolved {
        println!(
            "{} evolved! Attack {} / Defense {}",
            creature.name, outcome.attack, outcome.defense
        );
    }
    if creature.is_fully_evolved {
        println!("{} is fully evolved.", creature.name);
    }
}

fn parse_id(id: Option<&str>) -> Option<CreatureId> {
    id.map(CreatureId::new)
}

// =============================================================================
// ROSTER COMMANDS
// =============================================================================

/// List every creature.
pub fn cmd_list(session: &CliSession, json_mode: bool) -> Result<(), PetError> {
    let creatures = session.creatures();
    let selected = session.selected();

    if json_mode {
        let output = serde_json::json!({
            "selected": selected.map(CreatureId::as_str),
            "creatures": creatures.iter().map(creature_json).collect::<Vec<_>>(),
        });
        print_json(&output);
        return Ok(());
    }

    println!("Pokecare Roster");
    println!("===============");
    for creature in &creatures {
        let marker = if Some(&creature.id) == selected { '*' } else { ' ' };
        println!(
            "{} {:<4} {:<12} {:<16} HP {:>4}  JOY {:>4}",
            marker,
            creature.id.as_str(),
            creature.name,
            creature.stage().name(),
            creature.health.value(),
            creature.happiness.value()
        );
    }

    Ok(())
}

/// Show one creature in detail.
pub fn cmd_show(session: &CliSession, json_mode: bool, id: Option<&str>) -> Result<(), PetError> {
    let creature = session.resolve(parse_id(id).as_ref())?;

    if json_mode {
        print_json(&creature_json(&creature));
        return Ok(());
    }

    println!("{} ({})", creature.name, creature.id);
    println!("==========================");
    println!("Stage:     {}", creature.stage());
    println!("Health:    {}", creature.health);
    println!("Happiness: {}", creature.happiness);
    println!("Energy:    {}", creature.energy);
    println!("Attack:    {}", creature.attack);
    println!("Defense:   {}", creature.defense);
    println!("Gif:       {}", creature.gif);
    println!("Avatar:    {}", creature.avatar);

    let stage = creature.stage();
    let next = stage
        .next()
        .filter(|next| creature.target(*next).is_some());
    match next {
        Some(next) => println!("Next form: {}", next),
        None if creature.is_fully_evolved => println!("Fully evolved"),
        None if stage.is_terminal() => println!("Final form"),
        None => println!("Final form (two-stage line)"),
    }

    Ok(())
}

/// Select a creature directly or by navigation.
pub fn cmd_select(session: &mut CliSession, json_mode: bool, nav: Nav<'_>) -> Result<(), PetError> {
    let outcome = match nav {
        Nav::To(id) => session.select(&CreatureId::new(id))?,
        Nav::Next => session.select_next()?,
        Nav::Previous => session.select_previous()?,
    };
    let creature = session.selected_creature().ok_or(PetError::NoSelection)?;

    if json_mode {
        let output = serde_json::json!({
            "selected": creature.id.as_str(),
            "evolution": outcome,
            "creature": creature_json(&creature),
        });
        print_json(&output);
        return Ok(());
    }

    println!("Selected {} ({})", creature.name, creature.id);
    print_evolution(&creature, &outcome);
    Ok(())
}

// =============================================================================
// CARE COMMANDS
// =============================================================================

/// Apply a care action.
pub fn cmd_care(
    session: &mut CliSession,
    json_mode: bool,
    id: Option<&str>,
    action: CareAction,
) -> Result<(), PetError> {
    let id = session.resolve(parse_id(id).as_ref())?.id;
    let report = session.care(Some(&id), action)?;
    let creature = session.resolve(Some(&id))?;

    if json_mode {
        let output = serde_json::json!({
            "report": report,
            "creature": creature_json(&creature),
        });
        print_json(&output);
        return Ok(());
    }

    if report.applied {
        println!(
            "{}: health {} / happiness {}",
            creature.name, creature.health, creature.happiness
        );
    } else {
        println!("{} is already at full strength.", creature.name);
    }
    print_evolution(&creature, &report.evolution);
    Ok(())
}

/// Run the evolution check.
pub fn cmd_check(
    session: &mut CliSession,
    json_mode: bool,
    id: Option<&str>,
) -> Result<(), PetError> {
    let id = session.resolve(parse_id(id).as_ref())?.id;
    let outcome = session.check(Some(&id))?;
    let creature = session.resolve(Some(&id))?;

    if json_mode {
        let output = serde_json::json!({
            "evolution": outcome,
            "creature": creature_json(&creature),
        });
        print_json(&output);
        return Ok(());
    }

    if !outcome.has_evolved && !creature.is_fully_evolved {
        println!("{} is not ready to evolve ({}).", creature.name, creature.stage());
    }
    print_evolution(&creature, &outcome);
    Ok(())
}

// =============================================================================
// TASK COMMANDS
// =============================================================================

/// Add a task.
pub fn cmd_task_add(
    session: &mut CliSession,
    json_mode: bool,
    id: Option<&str>,
    stage: Option<u8>,
    title: &str,
) -> Result<(), PetError> {
    let stage = match stage {
        Some(number) => Some(Stage::from_number(number).ok_or_else(|| {
            PetError::Config(format!("Unknown stage {}, expected 1-3", number))
        })?),
        None => None,
    };
    let task = session.add_task(parse_id(id).as_ref(), stage, title)?;

    if json_mode {
        print_json(&serde_json::json!({ "task": task }));
    } else {
        println!("Added task #{}: {}", task, title);
    }
    Ok(())
}

/// Complete a task.
pub fn cmd_task_done(session: &mut CliSession, json_mode: bool, task: u64) -> Result<(), PetError> {
    let done = session.complete_task(task)?;

    if json_mode {
        print_json(&serde_json::json!({ "completed": done }));
        return Ok(());
    }

    match done {
        Some(task) => println!("Completed task #{}: {}", task.id, task.title),
        None => println!("No pending task #{}", task),
    }
    Ok(())
}

/// List pending tasks.
pub fn cmd_task_list(session: &CliSession, json_mode: bool) -> Result<(), PetError> {
    let tasks = session.tasks();

    if json_mode {
        print_json(&serde_json::json!({ "tasks": tasks }));
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No pending tasks.");
        return Ok(());
    }
    for task in tasks {
        println!(
            "#{:<3} {:<4} {:<16} {}",
            task.id,
            task.creature_id.as_str(),
            task.stage.name(),
            task.title
        );
    }
    Ok(())
}

// =============================================================================
// RESET COMMAND
// =============================================================================

/// Forget all saved state.
pub fn cmd_reset(session: &mut CliSession, json_mode: bool) -> Result<(), PetError> {
    session.reset()?;

    if json_mode {
        print_json(&serde_json::json!({ "reset": true }));
    } else {
        println!("Save data cleared.");
    }
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Open a session over the requested backend.
pub fn open_session(
    db_path: &Path,
    backend: &str,
    config: &Config,
) -> Result<CliSession, PetError> {
    let items = match backend {
        "redb" => StorageBackend::open_redb(db_path)?,
        "memory" => StorageBackend::default(),
        other => {
            return Err(PetError::Config(format!(
                "Unknown backend '{}', expected \"redb\" or \"memory\"",
                other
            )));
        }
    };
    tracing::debug!(backend, persistent = items.is_persistent(), "storage opened");
    Ok(PetSession::open(items, TracingCues, config))
}
