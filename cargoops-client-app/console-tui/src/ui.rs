use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use cargoops_console::viewmodel::ReceivedOrdersViewModel;
use cargoops_console::Page;
use cargoops_core::{
    BinnedRow, InventoryBin, LoadStatus, Package, PickOrder, PickSlip, ReceiveOutcome, ScanStep, StoringOrder,
};

use crate::app::{App, Focus};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();
    let area = frame.area();

    let session = app.shell.session();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" CargoOps Console · {} / {} ", session.role, session.employee_id))
        .title_style(theme.title);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Menu + page
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 1));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(rows[0]);

    render_menu(frame, app, columns[0], &theme);
    render_page(frame, app, columns[1], &theme);
    render_notice(frame, app, rows[1], &theme);
    render_footer(frame, app, rows[2], &theme);

    if let Some(mode) = app.input_mode {
        render_prompt(frame, mode.prompt(), &app.input, &theme);
    }
}

fn pane(title: String, focused: bool, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { theme.focused_border } else { theme.border })
        .title(title)
        .title_style(theme.title)
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let current = &app.shell.navigation().resolved_menu_key;
    let items: Vec<ListItem> = app
        .shell
        .menu_entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if &entry.key == current { "▸" } else { " " };
            let text = format!("{}{}{}", marker, "  ".repeat(entry.depth), entry.label);
            let style = if i == app.menu_index && app.focus == Focus::Menu {
                theme.selected
            } else if !entry.enabled {
                theme.disabled
            } else {
                theme.normal
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(pane(" Menu ".into(), app.focus == Focus::Menu, theme));
    frame.render_widget(list, area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let nav = app.shell.navigation();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(nav.breadcrumb.join(" / "), theme.muted)),
        Line::from(Span::styled(nav.title.clone(), theme.title)),
    ]);
    frame.render_widget(header, chunks[0]);

    let focused = app.focus == Focus::Page;
    match app.shell.page() {
        Page::StoringOrders(vm) => {
            let parents = vm.filtered_parents();
            let children = vm.visible_children();
            render_drill_down(
                frame,
                app,
                chunks[1],
                DrillDown {
                    title: format!(" Storing Orders ({}) ", parents.len()),
                    status: vm.parents().status(),
                    header: &["Storing Order", "Customer", "Order Date", "Invoice", "Status"],
                    rows: parents.iter().map(|o| storing_order_cells(o)).collect(),
                    child_header: &["Package", "Product", "Qty", "Status", "Allocated Bins"],
                    child_rows: children.rows.iter().map(|p| package_cells(p)).collect(),
                    child_status: children.status,
                    filter: vm.filter(),
                    focused,
                },
                theme,
            );
        }
        Page::PickSlips(vm) => {
            let parents = vm.filtered_parents();
            let children = vm.visible_children();
            render_drill_down(
                frame,
                app,
                chunks[1],
                DrillDown {
                    title: format!(" Pick Slips ({}) ", parents.len()),
                    status: vm.parents().status(),
                    header: &["Pick Slip", "Customer", "Created", "Delivery", "Status"],
                    rows: parents.iter().map(|s| pick_slip_cells(s)).collect(),
                    child_header: &["Pick Order", "Picker", "Zone", "Tasks", "Status"],
                    child_rows: children.rows.iter().map(|o| pick_order_cells(o)).collect(),
                    child_status: children.status,
                    filter: vm.filter(),
                    focused,
                },
                theme,
            );
        }
        Page::BinAssignment(vm) => {
            let rows = vm.rows();
            let block = pane(format!(" Binned Packages ({}) ", rows.len()), focused, theme);
            let inner = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(block.inner(chunks[1]));
            frame.render_widget(block, chunks[1]);

            render_table(
                frame,
                inner[0],
                &["Package", "Product", "Bin", "Assigned", "Binned", "Binning Date", "Status"],
                rows.iter().map(binned_cells).collect(),
                vm.packages().status(),
                Some(app.row_index),
                theme,
            );

            let status = match (&vm.allocating, &vm.last_allocation) {
                (Some(id), _) => Line::from(Span::styled(format!("Allocating bins for {}...", id), theme.warning)),
                (None, Some((id, bins))) => {
                    let bins: Vec<String> = bins.iter().map(|(bin, qty)| format!("{}×{}", bin, qty)).collect();
                    Line::from(Span::styled(format!("{} → {}", id, bins.join(", ")), theme.success))
                }
                (None, None) => Line::from(Span::styled("Press a to allocate bins for a package ID", theme.muted)),
            };
            frame.render_widget(Paragraph::new(status), inner[1]);
        }
        Page::Receiving(vm) => {
            let expected = vm.workflow.expected();
            let mut lines: Vec<Line> = ScanStep::ALL
                .iter()
                .map(|step| {
                    let value = vm.workflow.value(*step).unwrap_or("-");
                    let style = if Some(*step) == expected { theme.warning } else { theme.normal };
                    let marker = if Some(*step) == expected { "▸ " } else { "  " };
                    Line::from(vec![
                        Span::styled(format!("{}{:<18}", marker, step.label()), style),
                        Span::raw(value.to_string()),
                    ])
                })
                .collect();
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<18}", "Quantity"), theme.normal),
                Span::raw(vm.workflow.quantity().to_string()),
            ]));
            lines.push(Line::raw(""));
            if vm.submitting {
                lines.push(Line::from(Span::styled("Submitting receipt...", theme.warning)));
            }
            if let Some((receipt, outcome)) = &vm.last_result {
                let line = match outcome {
                    ReceiveOutcome::Passed => Span::styled(
                        format!("{} received ({} units)", receipt.storing_order_id, receipt.quantity),
                        theme.success,
                    ),
                    ReceiveOutcome::Failed { discrepancy_detail } => Span::styled(
                        format!("{} failed: {}", receipt.storing_order_id, discrepancy_detail),
                        theme.danger,
                    ),
                };
                lines.push(Line::from(line));
                if vm.saving_discrepancy {
                    lines.push(Line::from(Span::styled("Saving discrepancy...", theme.warning)));
                }
            }

            let body = Paragraph::new(lines)
                .block(pane(" Storing Order Receiving ".into(), focused, theme))
                .wrap(Wrap { trim: false });
            frame.render_widget(body, chunks[1]);
        }
        Page::ReceivedOrders(vm) => {
            let rows = vm.rows();
            let block = pane(format!(" Received Orders ({}) ", rows.len()), focused, theme);
            let inner = block.inner(chunks[1]);
            frame.render_widget(block, chunks[1]);
            render_table(
                frame,
                inner,
                &["Storing Order", "Receiver", "Received", "Packages", "Inspection", "Discrepancy"],
                rows.iter().map(received_order_cells).collect(),
                vm.orders().status(),
                Some(app.row_index),
                theme,
            );
        }
        Page::QualityCheck(vm) => {
            let block = pane(format!(" Packages ({}) ", vm.packages().rows().len()), focused, theme);
            let inner = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(3)])
                .split(block.inner(chunks[1]));
            frame.render_widget(block, chunks[1]);

            render_table(
                frame,
                inner[0],
                &["Package", "Product", "Qty", "Status"],
                vm.packages()
                    .rows()
                    .iter()
                    .map(|p| {
                        vec![
                            p.package_id.clone(),
                            p.product_id.clone(),
                            p.quantity.to_string(),
                            p.status.clone(),
                        ]
                    })
                    .collect(),
                vm.packages().status(),
                Some(app.row_index),
                theme,
            );

            let mut lines = match &vm.selected {
                Some(summary) => vec![
                    Line::from(vec![
                        Span::styled(format!("{}  ", summary.package_id), theme.title),
                        Span::raw(format!("{} × {}", summary.product_id, summary.ordered_quantity)),
                    ]),
                    Line::from(Span::styled(
                        summary.status.clone(),
                        if summary.awaiting_check() { theme.success } else { theme.warning },
                    )),
                ],
                None => vec![Line::from(Span::styled(
                    "Enter or / selects a package for inspection",
                    theme.muted,
                ))],
            };
            if let Some(check) = &vm.submitting {
                lines.push(Line::from(Span::styled(
                    format!("Submitting {} for {}...", check.flag, check.package_id),
                    theme.warning,
                )));
            }
            frame.render_widget(Paragraph::new(lines), inner[1]);
        }
        Page::Inventory(vm) => {
            let block = pane(format!(" Inventory · {} units ", vm.total_quantity()), focused, theme);
            let inner = block.inner(chunks[1]);
            frame.render_widget(block, chunks[1]);

            let racks: Vec<u8> = vm.racks().collect();
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, racks.len().max(1) as u32); racks.len()])
                .split(inner);
            for (rack, area) in racks.into_iter().zip(columns.iter()) {
                let bins = vm.rack(rack);
                let block = pane(format!(" R{} ({}/{}) ", rack, bins.len(), vm.slots_per_rack()), false, theme);
                let rack_area = block.inner(*area);
                frame.render_widget(block, *area);
                render_table(
                    frame,
                    rack_area,
                    &["Bin", "Product", "Qty"],
                    bins.into_iter().map(inventory_cells).collect(),
                    vm.bins().status(),
                    None,
                    theme,
                );
            }
        }
        Page::Static => {
            let body = Paragraph::new(format!("{}\n\nNothing to load on this page.", nav.title))
                .block(pane(format!(" {} ", nav.title), focused, theme))
                .alignment(Alignment::Center);
            frame.render_widget(body, chunks[1]);
        }
    }
}

struct DrillDown<'a> {
    title: String,
    status: &'a LoadStatus,
    header: &'a [&'a str],
    rows: Vec<Vec<String>>,
    child_header: &'a [&'a str],
    child_rows: Vec<Vec<String>>,
    child_status: &'a LoadStatus,
    filter: &'a str,
    focused: bool,
}

fn render_drill_down(frame: &mut Frame, app: &App, area: Rect, view: DrillDown<'_>, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Parent list
            Constraint::Length(1),      // Tabs
            Constraint::Min(4),         // Details
        ])
        .split(area);

    let title = if view.filter.is_empty() {
        view.title
    } else {
        format!("{}[filter: {}] ", view.title, view.filter)
    };
    let block = pane(title, view.focused, theme);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    render_table(frame, inner, view.header, view.rows, view.status, Some(app.row_index), theme);

    let (tab_ids, active) = app.tabs();
    if tab_ids.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Enter opens a detail tab", theme.muted)),
            chunks[1],
        );
    } else {
        let selected = active
            .as_deref()
            .and_then(|a| tab_ids.iter().position(|id| id == a))
            .unwrap_or(0);
        let tabs = Tabs::new(tab_ids)
            .select(selected)
            .style(theme.muted)
            .highlight_style(theme.selected)
            .divider("|");
        frame.render_widget(tabs, chunks[1]);
    }

    let block = pane(
        match &active {
            Some(id) => format!(" {} ", id),
            None => " Details ".into(),
        },
        false,
        theme,
    );
    let inner = block.inner(chunks[2]);
    frame.render_widget(block, chunks[2]);
    if active.is_some() {
        render_table(frame, inner, view.child_header, view.child_rows, view.child_status, None, theme);
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    header: &[&str],
    rows: Vec<Vec<String>>,
    status: &LoadStatus,
    selected: Option<usize>,
    theme: &Theme,
) {
    if rows.is_empty() {
        let (msg, style) = match status {
            LoadStatus::Loading => ("Loading...".to_string(), theme.muted),
            LoadStatus::Failed(reason) => (format!("Failed to load: {}", reason), theme.danger),
            LoadStatus::Idle | LoadStatus::Ready => ("(No records)".to_string(), theme.muted),
        };
        let p = Paragraph::new(msg).style(style).alignment(Alignment::Center);
        frame.render_widget(p, area);
        return;
    }

    let widths = vec![Constraint::Fill(1); header.len()];
    let header = Row::new(header.iter().map(|h| Cell::from(h.to_string()))).style(theme.header);
    let body: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let style = if Some(i) == selected { theme.selected } else { theme.normal };
            Row::new(cells.into_iter().map(Cell::from)).style(style)
        })
        .collect();

    frame.render_widget(Table::new(body, widths).header(header), area);
}

fn storing_order_cells(order: &StoringOrder) -> Vec<String> {
    vec![
        order.storing_order_id.clone(),
        order.customer_id.clone(),
        order.order_date.clone(),
        order.invoice_number.clone(),
        order.status.clone(),
    ]
}

fn package_cells(package: &Package) -> Vec<String> {
    let bins: Vec<String> = package
        .bin_allocation
        .iter()
        .map(|(bin, qty)| format!("{}×{}", bin, qty))
        .collect();
    vec![
        package.package_id.clone(),
        package.product_id.clone(),
        package.quantity.to_string(),
        package.status.clone(),
        bins.join(", "),
    ]
}

fn pick_slip_cells(slip: &PickSlip) -> Vec<String> {
    vec![
        slip.pick_slip_id.clone(),
        slip.customer_id.clone(),
        slip.created_date.clone(),
        slip.requested_delivery_date.clone(),
        slip.status.clone(),
    ]
}

fn pick_order_cells(order: &PickOrder) -> Vec<String> {
    vec![
        order.pick_order_id.clone(),
        order.picker_id.clone(),
        order.picking_zone.clone(),
        order.tasks.len().to_string(),
        order.status.clone(),
    ]
}

fn binned_cells(row: &BinnedRow) -> Vec<String> {
    vec![
        row.package_id.clone(),
        row.product_id.clone(),
        row.bin_location.clone(),
        row.assigned_quantity.to_string(),
        row.binned_quantity.map(|q| q.to_string()).unwrap_or_else(|| "-".into()),
        row.binning_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
        row.status.clone(),
    ]
}

fn received_order_cells(order: &StoringOrder) -> Vec<String> {
    let packages = match order.package_quantity {
        Some(quantity) => quantity.to_string(),
        None => order.packages.len().to_string(),
    };
    vec![
        order.storing_order_id.clone(),
        order.receiver_id.clone(),
        order.effective_received_date().to_string(),
        packages,
        order.doc_inspection_result.clone(),
        ReceivedOrdersViewModel::discrepancy_text(order).to_string(),
    ]
}

fn inventory_cells(bin: &InventoryBin) -> Vec<String> {
    vec![bin.bin_id.clone(), bin.product_id.clone(), bin.quantity.to_string()]
}

fn render_notice(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    if let Some(notice) = app.shell.notices().latest() {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", notice.message), theme.notice(notice.level)),
            Span::styled(" (x to dismiss)", theme.muted),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let mut hints: Vec<(&str, &str)> = vec![("Tab", "Focus"), ("g", "Go to path"), ("r", "Reload")];
    match (app.focus, app.shell.page()) {
        (Focus::Menu, _) => hints.extend([("↑/↓", "Navigate"), ("Enter", "Open")]),
        (Focus::Page, Page::StoringOrders(_) | Page::PickSlips(_)) => hints.extend([
            ("Enter", "Open tab"),
            ("[/]", "Switch tab"),
            ("c", "Close tab"),
            ("/", "Filter"),
        ]),
        (Focus::Page, Page::BinAssignment(_)) => {
            hints.extend([("Enter", "Re-allocate row"), ("a", "Allocate by ID")])
        }
        (Focus::Page, Page::Receiving(_)) => hints.extend([
            ("Enter", "Scan"),
            ("n", "Quantity"),
            ("u", "Submit"),
            ("z", "Reset"),
            ("d", "Discrepancy"),
        ]),
        (Focus::Page, Page::ReceivedOrders(_)) => hints.push(("d", "Edit discrepancy")),
        (Focus::Page, Page::QualityCheck(_)) => hints.extend([
            ("Enter", "Select"),
            ("/", "Search ID"),
            ("p", "Pass"),
            ("f", "Fail"),
        ]),
        (Focus::Page, Page::Inventory(_) | Page::Static) => {}
    }
    hints.push(("q", "Quit"));

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), theme.key_hint));
        spans.push(Span::styled(label, theme.muted));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn render_prompt(frame: &mut Frame, prompt: &str, input: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 3);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border)
        .title(format!(" {} (Enter / Esc) ", prompt))
        .title_style(theme.title);
    let p = Paragraph::new(Line::from(vec![Span::raw(input.to_string()), Span::styled("_", theme.key_hint)]))
        .block(block);
    frame.render_widget(p, area);
}

// Helper: shrink area by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height: height.min(area.height),
    }
}
