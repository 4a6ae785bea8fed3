//! A terminal payroll sheet.
//!
//! Enter employees through the form, delete rows from the table, and keep an
//! eye on the monthly payroll total against the budget.
//! Run with `--write-config` to create an editable config file.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{parse_budget, AppConfig};
use crate::ui::{
    form::FormWidget,
    layout::AppLayout,
    popup,
    table::{self, EmployeeTable},
    theme::Theme,
    total::TotalBar,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal payroll sheet with a monthly budget check")]
struct Cli {
    /// Monthly budget in dollars (overrides the config file).
    #[arg(long, value_parser = parse_budget)]
    monthly_budget: Option<Decimal>,

    /// Write the config file (defaults merged with any overrides) and exit.
    #[arg(long = "write-config")]
    write_config: bool,

    /// Send log output to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Don't capture the mouse.
    #[arg(long)]
    no_mouse: bool,
}

// ───────────────────────────────────────── logging ──────────

/// Initialise tracing.  Output is filtered by `RUST_LOG` and never goes to
/// stdout.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    state.scroll_to_selection(table::visible_rows(layout.table_area));

    let submit_hint = state.config.display_bindings(config::Action::Submit);
    let form = FormWidget {
        form: &state.form,
        has_focus: state.pane_focus == app::state::PaneFocus::Form
            && state.active_view == ActiveView::Main,
        submit_hint: &submit_hint,
    };
    if let Some(pos) = form.cursor_position(layout.form_area) {
        frame.set_cursor_position(pos);
    }
    frame.render_widget(form, layout.form_area);

    frame.render_widget(
        EmployeeTable {
            roster: &state.roster,
            selected: state.selected_row,
            offset: state.table_offset,
            has_focus: state.pane_focus == app::state::PaneFocus::Table,
        },
        layout.table_area,
    );

    frame.render_widget(
        TotalBar {
            total: &state.total,
            budget: state.config.monthly_budget,
        },
        layout.total_area,
    );

    let hint = state.config.status_bar_hint(state.pane_focus.scope());
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    match &state.active_view {
        ActiveView::BudgetWarning(message) => {
            let total = state.total.display();
            frame.render_widget(
                popup::BudgetWarningPopup {
                    message,
                    total: &total,
                },
                frame.area(),
            );
        }
        ActiveView::Help => {
            frame.render_widget(popup::HelpPopup { config: &state.config }, frame.area());
        }
        ActiveView::Main => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    if let Some(budget) = cli.monthly_budget {
        config.monthly_budget = budget;
    }
    if cli.no_mouse {
        config.mouse = false;
    }

    // ── config-writing mode ───────────────────────────────────
    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mouse = config.mouse;
    let mut state = AppState::new(config);

    // ── terminal setup ────────────────────────────────────────
    // Leave the alternate screen before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    if mouse {
        execute!(stderr_handle, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    tracing::info!(
        employees = state.roster.len(),
        monthly = %state.total.display(),
        "exiting"
    );
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));

    while !state.should_quit {
        let completed = terminal.draw(|frame| draw(frame, state))?;
        let screen = completed.area;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m, screen),
            AppEvent::Resize(_, _) => {}
        }
    }
    Ok(())
}
