//! Text rendering and command parsing shared by the terminal driver and the MCP server.
//!
//! Everything here works on [`BattleInfo`] snapshots, never on the live session.

use crate::battle::runner::{BattleInfo, MoveInfo, PlayerCommand, PokemonInfo, SideInfo};
use crate::battle::session::BattlePhase;
use crate::move_data::{is_known_move, lookup_move};
use crate::prefab_teams::PREFAB_SPECIES;
use crate::roster::{MAX_SPECIES_ID, TEAM_SIZE};
use schema::SecondaryEffect;

/// A line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(PlayerCommand),
    Status,
    Team,
    Moves,
    Lookup(String),
    Roster,
    Help,
    Quit,
}

/// Parse a line typed by the player. `info` resolves move numbers and names
/// against the active Pokemon.
pub fn parse_input(line: &str, info: &BattleInfo) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "" => return Err("Type 'help' for a list of commands.".to_string()),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        "status" => return Ok(Input::Status),
        "team" => return Ok(Input::Team),
        "moves" => return Ok(Input::Moves),
        "roster" | "pokedex" => return Ok(Input::Roster),
        "lookup" => return Ok(Input::Lookup(rest.to_string())),
        "pick" => PlayerCommand::ToggleSelection(parse_number(rest, "Pokemon id")?),
        "begin" => PlayerCommand::BeginStory,
        "start" => PlayerCommand::StartBattle,
        "fight" => PlayerCommand::OpenFightMenu,
        "switch" if rest.is_empty() => PlayerCommand::OpenSwitchMenu,
        "switch" => {
            let slot: usize = parse_number(rest, "team slot")?;
            if slot == 0 {
                return Err(format!("Team slots run from 1 to {}.", TEAM_SIZE));
            }
            PlayerCommand::SwitchTo(slot - 1)
        }
        "back" => PlayerCommand::Back,
        "use" => PlayerCommand::UseMove(resolve_move_id(rest, info)?),
        "next" => PlayerCommand::NextTrainer,
        "menu" => PlayerCommand::ReturnToMenu,
        other => {
            return Err(format!(
                "Unknown command '{}'. Type 'help' for a list of commands.",
                other
            ))
        }
    };
    Ok(Input::Command(command))
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("Expected a {} number, got '{}'.", what, text))
}

/// Turn "2", "thunderbolt" or "Thunder Bolt" into the active Pokemon's move id.
/// Unknown names are passed through so the session can reject them.
pub fn resolve_move_id(text: &str, info: &BattleInfo) -> Result<String, String> {
    if text.is_empty() {
        return Err("Which move? (e.g., 'use 1' or 'use thunderbolt')".to_string());
    }
    let moves = info
        .player
        .active()
        .map(|p| p.moves.as_slice())
        .unwrap_or_default();

    if let Ok(slot) = text.parse::<usize>() {
        return slot
            .checked_sub(1)
            .and_then(|index| moves.get(index))
            .map(|m| m.id.clone())
            .ok_or_else(|| format!("There is no move in slot {}.", slot));
    }

    let wanted = text.to_lowercase().replace([' ', '_'], "-");
    Ok(moves
        .iter()
        .find(|m| m.id == wanted || m.name.eq_ignore_ascii_case(text))
        .map_or(wanted, |m| m.id.clone()))
}

/// What the player can type in the current phase.
pub fn prompt_for(info: &BattleInfo) -> &'static str {
    match info.phase {
        BattlePhase::Selection => "pick <id> to toggle a Pokemon (1-386), then 'begin'",
        BattlePhase::PreBattleWait => "'start' to begin the battle",
        BattlePhase::CombatMenu => "'fight' or 'switch'",
        BattlePhase::FightMenu => "'use <move or number>' or 'back'",
        BattlePhase::SwitchMenu => "'switch <slot>' or 'back'",
        BattlePhase::ForceSwitchPlayer => "'switch <slot>' to send out your next Pokemon",
        BattlePhase::NextBattleTransition => "'next' to face the next trainer",
        BattlePhase::Loading if info.load_error.is_some() => "'menu' to return to team selection",
        BattlePhase::Victory | BattlePhase::Defeat => "'menu' to play again",
        _ => "please wait...",
    }
}

pub fn help_text() -> String {
    [
        "Commands:",
        "  pick <id>        toggle a Pokemon during team selection",
        "  begin            start the gauntlet with six chosen Pokemon",
        "  start            start the next battle",
        "  fight / switch   open the fight or switch menu",
        "  use <move>       use a move by number or name",
        "  switch <slot>    send out the Pokemon in that team slot",
        "  back             return to the command menu",
        "  next             continue to the next trainer",
        "  menu             return to team selection after a run",
        "  status, team, moves, roster, lookup <move>, help, quit",
    ]
    .join("\n")
}

fn status_tag(pokemon: &PokemonInfo) -> String {
    let mut tags = Vec::new();
    if pokemon.is_fainted {
        tags.push("fainted".to_string());
    } else if let Some(status) = pokemon.status {
        tags.push(status.to_string());
    }
    if pokemon.confused {
        tags.push("confused".to_string());
    }
    if let Some(charging) = &pokemon.charging {
        tags.push(format!("charging {}", charging));
    }
    if tags.is_empty() {
        String::new()
    } else {
        format!(" ({})", tags.join(", "))
    }
}

/// One-line summary: "Pikachu [electric] HP 211/211 (paralysis)".
pub fn display_pokemon_line(pokemon: &PokemonInfo) -> String {
    let types: Vec<String> = pokemon.types.iter().map(|t| t.to_string()).collect();
    format!(
        "{} [{}] HP {}/{}{}",
        pokemon.name,
        types.join("/"),
        pokemon.current_hp,
        pokemon.max_hp,
        status_tag(pokemon)
    )
}

fn display_move_line(index: usize, move_info: &MoveInfo) -> String {
    let power = if move_info.power == 0 {
        "status".to_string()
    } else {
        format!("{} power", move_info.power)
    };
    format!(
        " {}. {} ({}, {}) PP {}/{}",
        index + 1,
        move_info.name,
        move_info.move_type,
        power,
        move_info.current_pp,
        move_info.max_pp
    )
}

/// The active Pokemon's moves, numbered for `use <n>`.
pub fn display_moves(side: &SideInfo) -> String {
    match side.active() {
        Some(pokemon) => {
            let mut output = format!("--- {}'s Moves ---\n", pokemon.name);
            for (i, move_info) in pokemon.moves.iter().enumerate() {
                output.push_str(&display_move_line(i, move_info));
                output.push('\n');
            }
            output
        }
        None => "You have no active Pokemon.".to_string(),
    }
}

/// Displays a summary of one side's entire team
pub fn display_team_status(side: &SideInfo) -> String {
    if side.team.is_empty() {
        return format!("{} has no team yet.", side.player_name);
    }
    let mut output = format!("--- {}'s Team ---\n", side.player_name);
    for (i, pokemon) in side.team.iter().enumerate() {
        let active_marker = if i == side.active_index { " (Active)" } else { "" };
        output.push_str(&format!(
            " {}. {}{}\n",
            i + 1,
            display_pokemon_line(pokemon),
            active_marker
        ));
    }
    output
}

/// Gets the current battle status as a formatted string
pub fn display_battle_status(info: &BattleInfo) -> String {
    let mut output = match info.phase {
        BattlePhase::Selection => {
            let mut text = format!(
                "📋 {} - choose {} Pokemon ({}/{} chosen)\n",
                info.gauntlet.title(),
                TEAM_SIZE,
                info.selection.len(),
                TEAM_SIZE
            );
            if !info.selection.is_empty() {
                let ids: Vec<String> = info.selection.iter().map(u16::to_string).collect();
                text.push_str(&format!("Chosen: {}\n", ids.join(", ")));
            }
            text
        }
        BattlePhase::Victory => "🏆 Gauntlet Cleared! 🏆\n".to_string(),
        BattlePhase::Defeat => "💀 Gauntlet Over 💀\n".to_string(),
        BattlePhase::ForceSwitchPlayer => {
            "⚠️  Your Pokemon fainted! Choose a replacement. ⚠️\n".to_string()
        }
        _ => format!(
            "⚔️  {} - {} ({}/{}) ⚔️\n",
            info.gauntlet.title(),
            info.trainer_name,
            info.trainer_index + 1,
            info.trainer_count
        ),
    };

    if let Some(error) = &info.load_error {
        output.push_str(&format!("Error: {}\n", error));
    }
    if let (Some(enemy), Some(player)) = (info.enemy.active(), info.player.active()) {
        output.push_str(&format!(
            "{}: {} ({} left)\n",
            info.enemy.player_name,
            display_pokemon_line(enemy),
            info.enemy.healthy_count
        ));
        output.push_str(&format!(
            "You: {} ({} left)\n",
            display_pokemon_line(player),
            info.player.healthy_count
        ));
    }
    output.push_str(&format!("> {}", info.message));
    output
}

/// Handles the "lookup move" command for move details
pub fn handle_lookup_move_command(move_name: &str) -> String {
    if move_name.trim().is_empty() {
        return "What move do you want to look up? (e.g., 'tackle')".to_string();
    }
    let id = move_name.trim().to_lowercase().replace([' ', '_'], "-");
    if !is_known_move(&id) {
        return format!("The move '{}' was not found.", move_name);
    }
    let data = lookup_move(&id);
    let accuracy = if data.accuracy >= 100 {
        "never misses".to_string()
    } else {
        format!("{}% accuracy", data.accuracy)
    };
    let mut output = format!(
        "--- Move Details ---\n{} ({}): {} power, {}, {} PP",
        data.name, data.move_type, data.power, accuracy, data.max_pp
    );
    match data.effect {
        SecondaryEffect::None => {}
        SecondaryEffect::Status { status, .. } => output.push_str(&format!(
            "\n{}% chance to inflict {}",
            data.effect.chance_percent(),
            status
        )),
        SecondaryEffect::Confusion { .. } => output.push_str(&format!(
            "\n{}% chance to confuse",
            data.effect.chance_percent()
        )),
    }
    output
}

/// Species the offline roster can build, for choosing a team.
pub fn display_roster() -> String {
    let mut output = format!(
        "Any id from 1 to {} works online. Offline roster:\n",
        MAX_SPECIES_ID
    );
    let entries: Vec<String> = PREFAB_SPECIES
        .iter()
        .map(|entry| format!("#{} {}", entry.id, entry.name))
        .collect();
    for row in entries.chunks(6) {
        output.push_str("  ");
        output.push_str(&row.join(", "));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainers::Gauntlet;
    use pretty_assertions::assert_eq;
    use schema::{PokemonType, StatusCondition};

    fn pikachu() -> PokemonInfo {
        PokemonInfo {
            species_id: 25,
            name: "Pikachu".to_string(),
            types: vec![PokemonType::Electric],
            current_hp: 150,
            max_hp: 211,
            is_fainted: false,
            status: Some(StatusCondition::Paralysis),
            confused: false,
            charging: None,
            moves: vec![
                MoveInfo {
                    id: "thunderbolt".to_string(),
                    name: "Thunderbolt".to_string(),
                    move_type: PokemonType::Electric,
                    power: 90,
                    current_pp: 14,
                    max_pp: 15,
                },
                MoveInfo {
                    id: "quick-attack".to_string(),
                    name: "Quick Attack".to_string(),
                    move_type: PokemonType::Normal,
                    power: 40,
                    current_pp: 30,
                    max_pp: 30,
                },
            ],
        }
    }

    fn info(phase: BattlePhase) -> BattleInfo {
        let side = |name: &str, team: Vec<PokemonInfo>| SideInfo {
            player_name: name.to_string(),
            active_index: 0,
            healthy_count: team.len(),
            team,
        };
        BattleInfo {
            gauntlet: Gauntlet::GymLeaders,
            phase,
            message: "What will Pikachu do?".to_string(),
            trainer_name: "Brock".to_string(),
            trainer_index: 0,
            trainer_count: 8,
            selection: vec![],
            load_error: None,
            player: side("Player", vec![pikachu()]),
            enemy: side("Brock", vec![]),
        }
    }

    #[test]
    fn test_parse_commands() {
        let info = info(BattlePhase::FightMenu);
        assert_eq!(
            parse_input("pick 25", &info),
            Ok(Input::Command(PlayerCommand::ToggleSelection(25)))
        );
        assert_eq!(
            parse_input("switch 3", &info),
            Ok(Input::Command(PlayerCommand::SwitchTo(2)))
        );
        assert_eq!(
            parse_input("switch", &info),
            Ok(Input::Command(PlayerCommand::OpenSwitchMenu))
        );
        assert_eq!(parse_input("  TEAM ", &info), Ok(Input::Team));
        assert!(parse_input("switch 0", &info).is_err());
        assert!(parse_input("pick pikachu", &info).is_err());
        assert!(parse_input("dance", &info).is_err());
    }

    #[test]
    fn test_move_resolution() {
        let info = info(BattlePhase::FightMenu);
        assert_eq!(resolve_move_id("2", &info), Ok("quick-attack".to_string()));
        assert_eq!(resolve_move_id("Quick Attack", &info), Ok("quick-attack".to_string()));
        assert_eq!(resolve_move_id("thunderbolt", &info), Ok("thunderbolt".to_string()));
        // Unknown names pass through for the session to reject.
        assert_eq!(resolve_move_id("Hyper Beam", &info), Ok("hyper-beam".to_string()));
        assert!(resolve_move_id("5", &info).is_err());
    }

    #[test]
    fn test_pokemon_line() {
        assert_eq!(
            display_pokemon_line(&pikachu()),
            "Pikachu [electric] HP 150/211 (paralysis)"
        );
    }

    #[test]
    fn test_moves_display() {
        let text = display_moves(&info(BattlePhase::FightMenu).player);
        assert!(text.contains(" 1. Thunderbolt (electric, 90 power) PP 14/15"));
    }

    #[test]
    fn test_lookup_move() {
        assert!(handle_lookup_move_command("Slam").contains("75% accuracy"));
        assert!(handle_lookup_move_command("pound").contains("never misses"));
        assert!(
            handle_lookup_move_command("Thunderbolt").ends_with("10% chance to inflict paralysis")
        );
        assert!(handle_lookup_move_command("confusion").ends_with("10% chance to confuse"));
        assert!(!handle_lookup_move_command("pound").contains("chance"));
        assert_eq!(
            handle_lookup_move_command("splash-dance"),
            "The move 'splash-dance' was not found."
        );
    }

    #[test]
    fn test_prompt_follows_phase() {
        let mut info = info(BattlePhase::Loading);
        assert_eq!(prompt_for(&info), "please wait...");
        info.load_error = Some("offline".to_string());
        assert_eq!(prompt_for(&info), "'menu' to return to team selection");
    }
}
