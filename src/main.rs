//! Terminal driver: plays a gauntlet from stdin with real narrative delays.

use anyhow::Result;
use pokemon_gauntlet::battle::runner::SessionRunner;
use pokemon_gauntlet::battle::session::BattleSession;
use pokemon_gauntlet::config::GauntletConfig;
use pokemon_gauntlet::interface::{
    display_battle_status, display_moves, display_roster, display_team_status,
    handle_lookup_move_command, help_text, parse_input, prompt_for, Input,
};
use pokemon_gauntlet::progress::Progress;
use pokemon_gauntlet::trainers::Gauntlet;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GauntletConfig::from_env();
    let mut progress = Progress::load(&config.progress_file);
    info!(source = %config.roster_source, seed = ?config.seed, "starting terminal driver");

    println!("🔥 Welcome to the Pokemon Gauntlet! 🔥");
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let Some(gauntlet) = choose_gauntlet(&mut input, progress.elite_four_unlocked).await? else {
        return Ok(());
    };

    let session = BattleSession::new(gauntlet, config.pacing, config.rng(0));
    let mut runner = SessionRunner::new(session, config.build_roster_source());
    println!("{}", display_battle_status(&runner.battle_info()));
    println!("({})", prompt_for(&runner.battle_info()));

    while let Some(line) = input.next_line().await? {
        let info = runner.battle_info();
        match parse_input(&line, &info) {
            Err(message) => println!("{}", message),
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{}", help_text()),
            Ok(Input::Status) => println!("{}", display_battle_status(&info)),
            Ok(Input::Team) => println!("{}", display_team_status(&info.player)),
            Ok(Input::Moves) => println!("{}", display_moves(&info.player)),
            Ok(Input::Roster) => println!("{}", display_roster()),
            Ok(Input::Lookup(name)) => println!("{}", handle_lookup_move_command(&name)),
            Ok(Input::Command(command)) => {
                let mut shown = 0;
                let result = runner
                    .submit_with(command, |line| {
                        shown += 1;
                        println!("{}", line);
                    })
                    .await;
                match result {
                    Ok(()) if shown == 0 => println!("{}", runner.battle_info().message),
                    Ok(()) => {}
                    Err(err) => println!("Can't do that: {}", err),
                }

                if progress.record_unlock(runner.take_unlock_signal()) {
                    progress.save(&config.progress_file)?;
                    println!("🏅 The Elite Four is now unlocked! Restart to challenge them.");
                }
                println!("({})", prompt_for(&runner.battle_info()));
            }
        }
    }

    Ok(())
}

/// Ask which gauntlet to run. `None` when stdin closes first.
async fn choose_gauntlet(
    input: &mut Lines<BufReader<Stdin>>,
    unlocked: bool,
) -> Result<Option<Gauntlet>> {
    if !unlocked {
        println!("Starting {}. Clear it to unlock the Elite Four.", Gauntlet::GymLeaders.title());
        return Ok(Some(Gauntlet::GymLeaders));
    }

    loop {
        println!(
            "Choose a mode:\n  1. {}\n  2. {}",
            Gauntlet::GymLeaders.title(),
            Gauntlet::EliteFour.title()
        );
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        match line.trim() {
            "1" => return Ok(Some(Gauntlet::GymLeaders)),
            "2" => return Ok(Some(Gauntlet::EliteFour)),
            other => println!("'{}' is not an option.", other),
        }
    }
}
