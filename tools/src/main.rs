//! arena-runner: headless driver for the arena simulation core.
//!
//! Usage:
//!   arena-runner --seed 12345 --inputs 5000
//!   arena-runner --config data/game_config.json --seed 7 --inputs 200 --verify
//!   arena-runner --ipc-mode < session.jsonl

use anyhow::Result;
use arena_core::{
    config::GameConfig,
    engine::GameSystem,
    event::GameEvent,
    input::GameInput,
    replay,
    script::{InputScript, ScriptParams},
    state::GameState,
};
use std::cell::RefCell;
use std::env;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Input { input: GameInput },
    Reset { state: GameState },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcResponse<'a> {
    state:   &'a GameState,
    applied: bool,
    events:  Vec<GameEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let input_count = parse_arg(&args, "--inputs", 1_000usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let verify = args.iter().any(|a| a == "--verify");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if ipc_mode {
        let mut engine = GameSystem::new(config)?;
        return run_ipc_loop(&mut engine);
    }

    println!("arena-runner");
    println!("  seed:      {seed}");
    println!("  inputs:    {input_count}");
    println!("  config:    {}", config_path.unwrap_or("(built-in defaults)"));
    println!();

    let script = InputScript::generate(seed, input_count, &ScriptParams::for_config(&config));

    if verify {
        replay::verify_determinism(&config, &GameState::default(), &script.inputs)?;
        println!("determinism: two engines agreed on all {input_count} inputs");
        println!();
    }

    run_script(config, &script)
}

fn run_script(config: GameConfig, script: &InputScript) -> Result<()> {
    let mut engine = GameSystem::new(config)?;

    // Tally damage through the observer channel, the way a broadcaster would.
    let hits = Rc::new(RefCell::new(0usize));
    let self_hits = Rc::new(RefCell::new(0usize));
    {
        let hits = Rc::clone(&hits);
        let self_hits = Rc::clone(&self_hits);
        engine.on_damage(move |event| {
            let GameEvent::Damage { from_player_id, to_player_id } = event;
            *hits.borrow_mut() += 1;
            if from_player_id == to_player_id {
                *self_hits.borrow_mut() += 1;
            }
        });
    }

    let mut ignored = 0usize;
    let mut rejected = 0usize;
    let mut arrows_fired = 0u64;
    for input in &script.inputs {
        match engine.apply_input(input) {
            Ok(outcome) => {
                if !outcome.applied {
                    ignored += 1;
                } else if matches!(input, GameInput::PlayerAttack { .. }) {
                    arrows_fired += 1;
                }
            }
            Err(e) if e.is_rejected_input() => rejected += 1,
            Err(e) => return Err(e.into()),
        }
    }

    let state = engine.state();
    let dizzy = state.players.iter().filter(|p| p.is_dizzy(state.now)).count();

    println!("=== RUN SUMMARY ===");
    println!("  final time:     {:.1}", state.now);
    println!("  players:        {} ({dizzy} dizzy)", state.players.len());
    println!("  arrows fired:   {arrows_fired}");
    println!("  in flight:      {}", state.arrows.len());
    println!("  next arrow id:  {}", state.next_arrow_id);
    println!("  damage events:  {} ({} self-inflicted)", hits.borrow(), self_hits.borrow());
    println!("  ignored inputs: {ignored}");
    println!("  rejected:       {rejected}");
    Ok(())
}

fn run_ipc_loop(engine: &mut GameSystem) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                write_state(&mut stdout, engine, true, Vec::new())?;
            }
            IpcCommand::Input { input } => match engine.apply_input(&input) {
                Ok(outcome) => write_state(&mut stdout, engine, outcome.applied, outcome.events)?,
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
            IpcCommand::Reset { state } => match engine.reset(state) {
                Ok(()) => write_state(&mut stdout, engine, true, Vec::new())?,
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_state(
    out: &mut impl Write,
    engine: &GameSystem,
    applied: bool,
    events: Vec<GameEvent>,
) -> Result<()> {
    let response = IpcResponse { state: engine.state(), applied, events };
    writeln!(out, "{}", serde_json::to_string(&response)?)?;
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    log::warn!("ipc request failed: {message}");
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
