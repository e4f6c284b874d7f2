//! Roster Console - terminal front-end for the employee directory
//!
//! # Overview
//!
//! The console wires the data-access layer into an interactive terminal
//! client:
//!
//! - **Router** (`router`): fixed route set with auth-gated resolution
//! - **Auth gate** (`state::auth`): session token/user, hydrated from the
//!   local store
//! - **Directory state** (`state::directory`): view mode, sort, filter,
//!   pagination cursor and the persisted flag set
//! - **Shell** (`app` + `ui`): event loop, key handling and rendering
//!
//! # Module structure
//!
//! ```text
//! roster-console/src/
//! ├── app.rs         # application state + event loop
//! ├── config.rs      # env-driven configuration
//! ├── logger.rs      # tracing setup (tui + optional file)
//! ├── router.rs      # routes and access resolution
//! ├── state/         # auth gate, directory state machine
//! └── ui/            # ratatui views (directory, detail, login, pages)
//! ```

pub mod app;
pub mod config;
pub mod logger;
pub mod router;
pub mod state;
pub mod ui;

// Re-export the pieces main() needs
pub use app::{run, App, AppEvent};
pub use config::Config;
pub use router::Route;

pub fn print_banner() {
    println!(
        r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#
    );
}
