//! Terminal table-size picker with document search.
//!
//! Hover the grid to preview an R×C block, confirm to size a table, and
//! quit — the markdown table skeleton is printed to stdout so it can be
//! piped into an editor. `/` opens a search modal over the workspace's
//! markdown documents.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler, search_runtime,
    search_runtime::SearchReply,
    state::{ActiveView, AppState},
};
use crate::core::{grid::GridDims, search::WorkspaceIndex, table};
use crate::ui::{
    grid::GridSelectWidget,
    layout::AppLayout,
    search::SearchModalWidget,
    theme::{GridStyles, Theme},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Grid-based table size picker with document search")]
struct Cli {
    /// Workspace root to index for document search (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Grid rows (overrides the configured default).
    #[arg(long)]
    rows: Option<u16>,

    /// Grid columns (overrides the configured default).
    #[arg(long)]
    cols: Option<u16>,

    /// Cell width in terminal columns.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Render the grid disabled (no hover preview; clicks still select).
    #[arg(long)]
    disabled: bool,

    /// Maximum search results per query.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Index hidden (dot) files too.
    #[arg(long)]
    hidden: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let user_config = config::AppConfig::load();
    if !config::AppConfig::exists() {
        // Write a starter config so users have something to edit.
        let _ = user_config.save();
    }

    let dims = GridDims::new(
        cli.rows.unwrap_or(user_config.rows),
        cli.cols.unwrap_or(user_config.cols),
    );
    let cell_size = cli.cell_size.unwrap_or(user_config.cell_size);

    // ── build the document index ──────────────────────────────
    let index = WorkspaceIndex::build(&cli.path, cli.hidden)?;
    let startup_message = if index.is_empty() {
        format!("no markdown documents under {}", cli.path.display())
    } else {
        format!("{} documents indexed — press / to search", index.len())
    };
    let mut state = AppState::new(
        dims,
        cell_size,
        cli.disabled,
        Arc::new(index),
        cli.limit,
        user_config,
    );
    state.status_message = Some(startup_message);
    state.styles = GridStyles::from_colors(&state.config.colors);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    state.terminal_area = Rect::new(0, 0, size.width, size.height);

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (search_tx, mut search_rx) = tokio::sync::mpsc::unbounded_channel::<SearchReply>();

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        // Issue a pending query AFTER the draw so the loading state is
        // already on screen when the worker starts.
        if state.search.wants_search {
            state.search.wants_search = false;
            let generation = state.search.issue();
            search_runtime::spawn_search(
                search_tx.clone(),
                generation,
                Arc::clone(&state.searcher),
                state.search.keyword.clone(),
                state.result_limit,
            );
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.terminal_area = Rect::new(0, 0, w, h),
                    AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                }
            }

            Some((generation, result)) = search_rx.recv() => {
                // Batch-drain so a burst of superseded replies costs a
                // single redraw; stale generations are dropped either way.
                search_runtime::apply_search_reply(&mut state, generation, result);
                while let Ok((generation, result)) = search_rx.try_recv() {
                    search_runtime::apply_search_reply(&mut state, generation, result);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(selection) = state.last_selection {
        print!("{}", table::markdown_table(selection));
    }

    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area(), state.grid.dims, state.cell_size);

    let title = match &state.active_document {
        Some(doc) => format!(" {} — table size ", doc.title),
        None => " table size ".to_string(),
    };
    let grid_block = Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(
        GridSelectWidget::new(&state.grid, state.cell_size)
            .styles(state.styles)
            .block(grid_block),
        layout.grid_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.active_view == ActiveView::Search {
        frame.render_widget(
            SearchModalWidget {
                search: &state.search,
                tick: state.tick,
            },
            frame.area(),
        );
    }
}
