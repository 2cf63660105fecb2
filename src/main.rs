use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use arcade_holdem::bot::policy::Difficulty;
use arcade_holdem::ui::{app::App, input, render};

#[derive(Parser, Debug)]
#[command(name = "arcade-holdem")]
#[command(about = "Single-table No-Limit Texas Hold'em against configurable bots")]
#[command(version)]
struct Args {
    /// Number of bot opponents at the table (1-7)
    #[arg(long, default_value = "4")]
    bots: usize,

    /// Bot difficulty
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: Difficulty,

    /// Starting stack in chips
    #[arg(long, default_value = "500")]
    stack: u32,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Restore the terminal on panic before the default handler prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(args.bots, args.difficulty, args.stack);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // best-effort: the hand history is a side channel
    app.history.save();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| render::render(f, app))?;

        let dt_ms = last_tick.elapsed().as_secs_f32() * 1000.0;
        last_tick = Instant::now();
        app.tick(dt_ms);

        // 50ms poll keeps bot pacing responsive without spinning
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = input::handle_key(key, &app.table, &mut app.raise_input)
                    {
                        app.apply(action);
                    }
                }
            }
        }
    }

    Ok(())
}
