use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::io::stdout;

pub mod app;
pub mod config;
pub mod count;
pub mod document;
pub mod events;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod tree;
pub mod ui;
pub mod widgets;

// Re-export main types for easier imports
pub use app::{App, Focus, PromptKind};

#[tokio::main]
async fn main() -> Result<()> {
    // Get command line arguments: an optional folder or file to open
    let args: Vec<String> = std::env::args().collect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run the app
    let mut app = if args.len() > 1 {
        App::with_path(&args[1]).await?
    } else {
        App::new().await
    };
    let result = app.run(&mut terminal).await;

    // Restore the terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        ratatui::crossterm::cursor::Show
    )?;

    // Handle any final errors
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}
