//! Nine Ball entry point
//!
//! Terminal shell around the simulation: a clock thread and a stdin reader
//! feed one event queue, and the game loop draws the board as text.
//!
//! Commands (one per line):
//! - `c X Y`  click tile (X, Y) with the current cursor orientation
//! - `t`      toggle the cursor orientation
//! - `r`      redraw (same as a window resize)
//! - `q`      quit

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::BufRead;
    use std::path::PathBuf;
    use std::sync::mpsc::Sender;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use glam::IVec2;

    use nineball::platform::{Button, EventQueue, GameLoop, InputEvent, Pointer, spawn_clock};
    use nineball::renderer::{render_board, status_line};
    use nineball::sim::{GameState, Outcome};
    use nineball::{Difficulty, Settings};

    /// Build walls to capture the grid without touching the balls
    #[derive(Debug, Parser)]
    #[command(name = "nineball", version)]
    struct Args {
        /// Settings file (JSON)
        #[arg(long, default_value = "nineball.json")]
        settings: PathBuf,
        /// RNG seed, overrides the settings file
        #[arg(long)]
        seed: Option<u64>,
        /// Difficulty preset (classic, hard), overrides the settings file
        #[arg(long)]
        difficulty: Option<String>,
        /// Redraw the board every N clock ticks (0: only on request)
        #[arg(long, default_value_t = 33)]
        draw_every: u64,
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let mut settings = Settings::load_or_default(&args.settings);
        if let Some(name) = args.difficulty.as_deref() {
            match Difficulty::from_str(name) {
                Some(difficulty) => settings.difficulty = Some(difficulty),
                None => log::warn!("Unknown difficulty '{}', ignoring", name),
            }
        }
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
        let config = settings.sim_config();
        log::info!(
            "Nine Ball starting: seed {}, difficulty {}, win at {:.0}%, tick {} ms",
            seed,
            settings.difficulty.map_or("custom", |d| d.as_str()),
            config.win_threshold * 100.0,
            settings.tick_ms
        );
        let state = match GameState::new(config, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                std::process::exit(1);
            }
        };

        let queue = EventQueue::new();
        spawn_clock(queue.sender(), Duration::from_millis(settings.tick_ms));
        spawn_stdin(queue.sender());
        let events = queue.into_receiver();

        let mut game = GameLoop::new(state);
        draw(&game.state);
        let draw_every = args.draw_every;
        game.run(&events, |state, event, report| {
            let redraw = match (event, report) {
                (InputEvent::Resize, _) => true,
                (InputEvent::Clock, Some(report)) => {
                    report.outcome != Outcome::Playing
                        || (draw_every > 0 && state.time_ticks % draw_every == 0)
                }
                _ => false,
            };
            if let Some(report) = report {
                match report.outcome {
                    Outcome::Won => println!("Level cleared with {:.1}% captured!", report.captured * 100.0),
                    Outcome::Lost => println!("Out of lives. Back to level 1."),
                    Outcome::Playing => {}
                }
            }
            if redraw {
                draw(state);
            }
        });
    }

    fn draw(state: &GameState) {
        print!("{}", render_board(state));
        println!("{}", status_line(state));
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Read commands from stdin; the pointer (and its orientation) lives here
    fn spawn_stdin(sender: Sender<InputEvent>) {
        thread::spawn(move || {
            let mut pointer = Pointer::new();
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let event = match parse_command(&line) {
                    Some(Command::Click(tile)) => pointer.press(Button::Primary, tile),
                    Some(Command::Toggle) => {
                        let orientation = pointer.toggle();
                        log::info!("Cursor orientation: {:?}", orientation);
                        None
                    }
                    Some(Command::Redraw) => Some(InputEvent::Resize),
                    Some(Command::Quit) => Some(InputEvent::Quit),
                    None => {
                        log::warn!("Unknown command: {}", line.trim());
                        None
                    }
                };
                if let Some(event) = event {
                    if sender.send(event).is_err() || event == InputEvent::Quit {
                        break;
                    }
                }
            }
            // End of input quits too
            let _ = sender.send(InputEvent::Quit);
        });
    }

    #[derive(Debug, PartialEq)]
    enum Command {
        Click(IVec2),
        Toggle,
        Redraw,
        Quit,
    }

    fn parse_command(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "c" | "click" => {
                let x = parts.next()?.parse().ok()?;
                let y = parts.next()?.parse().ok()?;
                Some(Command::Click(IVec2::new(x, y)))
            }
            "t" | "toggle" => Some(Command::Toggle),
            "r" | "redraw" => Some(Command::Redraw),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_command() {
            assert_eq!(parse_command("c 10 5"), Some(Command::Click(IVec2::new(10, 5))));
            assert_eq!(parse_command("  click 3 4 "), Some(Command::Click(IVec2::new(3, 4))));
            assert_eq!(parse_command("t"), Some(Command::Toggle));
            assert_eq!(parse_command("q"), Some(Command::Quit));
            assert_eq!(parse_command("c 10"), None);
            assert_eq!(parse_command("c x y"), None);
            assert_eq!(parse_command(""), None);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library is usable from wasm directly
}
