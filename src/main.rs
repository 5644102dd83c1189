use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dungeonheart::core::constants::AUTOSAVE_INTERVAL_SECONDS;
use dungeonheart::core::engine::{Engine, EngineConfig};
use dungeonheart::persistence;
use dungeonheart::research::types::RESEARCH_NODES;
use dungeonheart::ui::{draw, UiState};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = EngineConfig::default();
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                println!("Dungeon Heart - idle dungeon simulation\n");
                println!("Usage: dungeonheart [--seed N]\n");
                println!("Keys: [s] speed  [space] pause  [p] prestige  [up/down] select");
                println!("      [enter] start research  [d] node details  [q] quit");
                return Ok(());
            }
            "--seed" if args.len() > 2 => {
                config.seed = args[2].parse().ok();
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run 'dungeonheart --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut engine = Engine::new(config);
    persistence::load_into(persistence::SAVE_FILE, &mut engine.state);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut engine);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = persistence::save(&engine.state) {
        eprintln!("Warning: could not write save file: {e}");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine,
) -> io::Result<()> {
    let mut ui = UiState::new();
    let mut last_frame = Instant::now();
    let mut last_save = Instant::now();

    loop {
        let now = Instant::now();
        let dt_real = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        engine.tick(dt_real);

        if last_save.elapsed().as_secs() >= AUTOSAVE_INTERVAL_SECONDS {
            last_save = Instant::now();
            if persistence::save(&engine.state).is_err() {
                engine.state.log.push("Autosave failed; continuing.");
            }
        }

        terminal.draw(|frame| draw(frame, engine, &ui))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if ui.confirm_prestige {
                    match key.code {
                        KeyCode::Char('y') => {
                            engine.prestige();
                            ui.confirm_prestige = false;
                        }
                        KeyCode::Char('n') | KeyCode::Esc => ui.confirm_prestige = false,
                        _ => {}
                    }
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('s') => {
                        engine.cycle_speed();
                    }
                    KeyCode::Char(' ') => {
                        engine.toggle_pause();
                    }
                    KeyCode::Char('p') => ui.confirm_prestige = true,
                    KeyCode::Char('d') => ui.show_details = !ui.show_details,
                    KeyCode::Esc => ui.show_details = false,
                    KeyCode::Up => {
                        ui.selected_research =
                            ui.selected_research.checked_sub(1).unwrap_or(RESEARCH_NODES.len() - 1);
                    }
                    KeyCode::Down => {
                        ui.selected_research = (ui.selected_research + 1) % RESEARCH_NODES.len();
                    }
                    KeyCode::Enter => {
                        let id = RESEARCH_NODES[ui.selected_research].id();
                        engine.start_research(&id);
                    }
                    _ => {}
                }
            }
        }
    }
}
