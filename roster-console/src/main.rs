use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use roster_console::{App, Config, Route, logger, print_banner, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    logger::init(config.log_dir.as_deref());

    print_banner();
    tracing::info!("Roster console starting...");

    // 2. Local data directory (redb does not create parents)
    if !Path::new(&config.data_dir).exists() {
        std::fs::create_dir_all(&config.data_dir)?;
    }

    // 3. Application state; a persisted session lands on Home, so load
    //    the directory before the first draw
    let (mut app, mut events) = App::new(&config)?;
    if app.route == Route::Home {
        app.refresh();
    }

    // 4. Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}
