use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

use cargoops_console::Page;
use cargoops_core::QualityFlag;

use crate::app::{App, Focus, InputMode};

/// Poll for keyboard events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle keyboard input
pub fn handle_event(app: &mut App, event: Event) {
    let Event::Key(key) = event else {
        // Resize handled by ratatui automatically
        return;
    };
    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.input_mode.is_some() {
        handle_input(app, key.code);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('g') => app.begin_input(InputMode::Path),
        KeyCode::Char('r') => app.shell.refresh(),
        KeyCode::Char('x') => {
            app.shell.notices_mut().dismiss_latest();
        }
        code => match app.focus {
            Focus::Menu => handle_menu(app, code),
            Focus::Page => handle_page(app, code),
        },
    }
}

fn handle_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.commit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            let numeric_only = app.input_mode == Some(InputMode::Quantity);
            if !numeric_only || c.is_ascii_digit() {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_menu(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
        KeyCode::Enter => app.select_menu(),
        _ => {}
    }
}

fn handle_page(app: &mut App, code: KeyCode) {
    match app.shell.page() {
        Page::StoringOrders(_) | Page::PickSlips(_) => handle_drill_down(app, code),
        Page::BinAssignment(_) => handle_binning(app, code),
        Page::Receiving(_) => handle_receiving(app, code),
        Page::ReceivedOrders(_) => handle_received_orders(app, code),
        Page::QualityCheck(_) => handle_quality_check(app, code),
        Page::Inventory(_) | Page::Static => {
            if code == KeyCode::Esc {
                app.focus = Focus::Menu;
            }
        }
    }
}

fn handle_drill_down(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.row_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_down(),
        KeyCode::Enter => {
            if let Some(id) = app.selected_id() {
                app.shell.open_tab(&id);
            }
        }
        KeyCode::Right | KeyCode::Char(']') => app.cycle_tab(true),
        KeyCode::Left | KeyCode::Char('[') => app.cycle_tab(false),
        KeyCode::Char('c') => app.close_active_tab(),
        KeyCode::Char('/') => app.begin_input(InputMode::Filter),
        KeyCode::Esc => app.focus = Focus::Menu,
        _ => {}
    }
}

fn handle_binning(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.row_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_down(),
        KeyCode::Enter => {
            if let Some(package_id) = app.selected_id() {
                app.shell.allocate_bins(&package_id);
            }
        }
        KeyCode::Char('a') => app.begin_input(InputMode::PackageId),
        KeyCode::Esc => app.focus = Focus::Menu,
        _ => {}
    }
}

fn handle_receiving(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Char('s') => app.begin_input(InputMode::Scan),
        KeyCode::Char('n') => app.begin_input(InputMode::Quantity),
        KeyCode::Char('u') => app.shell.submit_receipt(),
        KeyCode::Char('z') => app.shell.reset_scan(),
        KeyCode::Char('d') => app.begin_discrepancy(),
        KeyCode::Esc => app.focus = Focus::Menu,
        _ => {}
    }
}

fn handle_received_orders(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.row_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_down(),
        KeyCode::Enter | KeyCode::Char('d') => app.begin_discrepancy(),
        KeyCode::Esc => app.focus = Focus::Menu,
        _ => {}
    }
}

fn handle_quality_check(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.row_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_down(),
        KeyCode::Enter => {
            if let Some(package_id) = app.selected_id() {
                app.shell.search_package(&package_id);
            }
        }
        KeyCode::Char('/') => app.begin_input(InputMode::PackageSearch),
        KeyCode::Char('p') => app.shell.submit_quality_check(QualityFlag::Pass),
        KeyCode::Char('f') => app.shell.submit_quality_check(QualityFlag::Fail),
        KeyCode::Esc => app.focus = Focus::Menu,
        _ => {}
    }
}
