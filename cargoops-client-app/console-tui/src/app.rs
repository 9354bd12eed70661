use cargoops_console::{AppShell, Notice, Page};
use cargoops_core::ParentRecord;

/// Which pane receives navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Page,
}

/// Line-input prompts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Path,
    Filter,
    Scan,
    Quantity,
    PackageId,
    PackageSearch,
    Discrepancy,
}

impl InputMode {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputMode::Path => "Go to path",
            InputMode::Filter => "Filter by id",
            InputMode::Scan => "Scan value",
            InputMode::Quantity => "Received quantity",
            InputMode::PackageId => "Package ID to allocate",
            InputMode::PackageSearch => "Package ID to check",
            InputMode::Discrepancy => "Discrepancy detail",
        }
    }
}

/// Application state
pub struct App {
    pub shell: AppShell,
    pub should_quit: bool,
    pub focus: Focus,

    // Menu state
    pub menu_index: usize,

    // Selected row on the mounted page
    pub row_index: usize,
    mounted: u64,

    // Prompt state
    pub input_mode: Option<InputMode>,
    pub input: String,
    /// Storing order the discrepancy prompt edits.
    discrepancy_for: Option<String>,
}

impl App {
    pub fn new(shell: AppShell) -> Self {
        let mounted = shell.mount_id();
        let mut app = Self {
            shell,
            should_quit: false,
            focus: Focus::Menu,
            menu_index: 0,
            row_index: 0,
            mounted,
            input_mode: None,
            input: String::new(),
            discrepancy_for: None,
        };
        app.menu_index = app.current_menu_index();
        app
    }

    fn current_menu_index(&self) -> usize {
        let key = &self.shell.navigation().resolved_menu_key;
        self.shell
            .menu_entries()
            .iter()
            .position(|entry| &entry.key == key)
            .unwrap_or(0)
    }

    /// Reset the row cursor when a new page is mounted and keep it in range.
    pub fn sync_selection(&mut self) {
        if self.shell.mount_id() != self.mounted {
            self.mounted = self.shell.mount_id();
            self.row_index = 0;
            self.menu_index = self.current_menu_index();
        }
        let rows = self.row_count();
        if self.row_index >= rows {
            self.row_index = rows.saturating_sub(1);
        }
    }

    pub fn row_count(&self) -> usize {
        match self.shell.page() {
            Page::StoringOrders(vm) => vm.filtered_parents().len(),
            Page::PickSlips(vm) => vm.filtered_parents().len(),
            Page::BinAssignment(vm) => vm.rows().len(),
            Page::ReceivedOrders(vm) => vm.rows().len(),
            Page::QualityCheck(vm) => vm.packages().rows().len(),
            Page::Receiving(_) | Page::Inventory(_) | Page::Static => 0,
        }
    }

    /// Id of the row under the cursor: a parent id on drill-down pages, a
    /// package id on the package pages, a storing order on the receiving list.
    pub fn selected_id(&self) -> Option<String> {
        match self.shell.page() {
            Page::StoringOrders(vm) => vm
                .filtered_parents()
                .get(self.row_index)
                .map(|p| p.entity_id().to_string()),
            Page::PickSlips(vm) => vm
                .filtered_parents()
                .get(self.row_index)
                .map(|p| p.entity_id().to_string()),
            Page::BinAssignment(vm) => vm.rows().get(self.row_index).map(|r| r.package_id.clone()),
            Page::QualityCheck(vm) => vm
                .packages()
                .rows()
                .get(self.row_index)
                .map(|p| p.package_id.clone()),
            Page::ReceivedOrders(vm) => vm
                .rows()
                .get(self.row_index)
                .map(|o| o.storing_order_id.clone()),
            Page::Receiving(_) | Page::Inventory(_) | Page::Static => None,
        }
    }

    /// Open tab ids in order, with the active one.
    pub fn tabs(&self) -> (Vec<String>, Option<String>) {
        let workspace = match self.shell.page() {
            Page::StoringOrders(vm) => vm.workspace(),
            Page::PickSlips(vm) => vm.workspace(),
            _ => return (Vec::new(), None),
        };
        let ids = workspace.tab_ids().into_iter().map(str::to_string).collect();
        (ids, workspace.active().map(str::to_string))
    }

    // Navigation helpers
    pub fn menu_up(&mut self) {
        if self.menu_index > 0 {
            self.menu_index -= 1;
        }
    }

    pub fn menu_down(&mut self) {
        let len = self.shell.menu_entries().len();
        if self.menu_index + 1 < len {
            self.menu_index += 1;
        }
    }

    pub fn row_up(&mut self) {
        if self.row_index > 0 {
            self.row_index -= 1;
        }
    }

    pub fn row_down(&mut self) {
        if self.row_index + 1 < self.row_count() {
            self.row_index += 1;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Menu => Focus::Page,
            Focus::Page => Focus::Menu,
        };
    }

    /// Activate the highlighted menu entry. Disabled entries go through the
    /// shell too so the user gets the access warning.
    pub fn select_menu(&mut self) {
        let Some(entry) = self.shell.menu_entries().into_iter().nth(self.menu_index) else {
            return;
        };
        if self.shell.select_menu(&entry.key) {
            self.focus = Focus::Page;
        }
    }

    /// Switch to the tab before or after the active one.
    pub fn cycle_tab(&mut self, forward: bool) {
        let (ids, active) = self.tabs();
        if let Some(next) = neighbour(&ids, active.as_deref(), forward) {
            let next = next.to_string();
            self.shell.switch_tab(&next);
        }
    }

    pub fn close_active_tab(&mut self) {
        if let (_, Some(active)) = self.tabs() {
            self.shell.close_tab(&active);
        }
    }

    pub fn begin_input(&mut self, mode: InputMode) {
        self.input_mode = Some(mode);
        self.input.clear();
        if mode == InputMode::Filter {
            if let Page::StoringOrders(vm) = self.shell.page() {
                self.input = vm.filter().to_string();
            } else if let Page::PickSlips(vm) = self.shell.page() {
                self.input = vm.filter().to_string();
            }
        }
    }

    /// Open the discrepancy prompt for the selected order (receiving list) or
    /// the last answered receipt (receiving page), prefilled with its detail.
    pub fn begin_discrepancy(&mut self) {
        let target = match self.shell.page() {
            Page::ReceivedOrders(vm) => self
                .selected_id()
                .map(|id| (vm.current_detail(&id).unwrap_or_default().to_string(), id)),
            Page::Receiving(vm) => vm.discrepancy_target().map(|id| (String::new(), id.to_string())),
            _ => None,
        };
        match target {
            Some((detail, id)) => {
                self.begin_input(InputMode::Discrepancy);
                self.input = detail;
                self.discrepancy_for = Some(id);
            }
            None => self
                .shell
                .notices_mut()
                .push(Notice::warning("Select a storing order first")),
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = None;
        self.input.clear();
        self.discrepancy_for = None;
    }

    /// Hand the prompt value to the shell.
    pub fn commit_input(&mut self) {
        let Some(mode) = self.input_mode.take() else {
            return;
        };
        let value = std::mem::take(&mut self.input);
        match mode {
            InputMode::Path => {
                self.shell.navigate_path(value.trim());
            }
            InputMode::Filter => {
                self.shell.set_filter(&value);
                self.row_index = 0;
            }
            InputMode::Scan => self.shell.scan(&value),
            InputMode::PackageId => self.shell.allocate_bins(&value),
            InputMode::PackageSearch => self.shell.search_package(&value),
            InputMode::Discrepancy => {
                if let Some(id) = self.discrepancy_for.take() {
                    self.shell.save_discrepancy(&id, &value);
                }
            }
            InputMode::Quantity => match value.trim().parse::<u32>() {
                Ok(quantity) => self.shell.set_quantity(quantity),
                Err(_) => self
                    .shell
                    .notices_mut()
                    .push(Notice::warning("Quantity must be a whole number")),
            },
        }
    }
}

/// Neighbouring id in `ids`, wrapping at both ends.
pub fn neighbour<'a>(ids: &'a [String], current: Option<&str>, forward: bool) -> Option<&'a str> {
    if ids.is_empty() {
        return None;
    }
    let Some(pos) = current.and_then(|c| ids.iter().position(|id| id == c)) else {
        return ids.first().map(String::as_str);
    };
    let next = if forward {
        (pos + 1) % ids.len()
    } else {
        (pos + ids.len() - 1) % ids.len()
    };
    Some(ids[next].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_neighbour_wraps() {
        let tabs = ids(&["SO-1", "SO-2", "SO-3"]);
        assert_eq!(neighbour(&tabs, Some("SO-3"), true), Some("SO-1"));
        assert_eq!(neighbour(&tabs, Some("SO-1"), false), Some("SO-3"));
        assert_eq!(neighbour(&tabs, Some("SO-2"), true), Some("SO-3"));
    }

    #[test]
    fn test_neighbour_without_active() {
        assert_eq!(neighbour(&[], None, true), None);
        assert_eq!(neighbour(&ids(&["PS-1"]), None, false), Some("PS-1"));
    }

    #[test]
    fn test_input_prompts() {
        assert_eq!(InputMode::Scan.prompt(), "Scan value");
        assert_eq!(InputMode::Path.prompt(), "Go to path");
        assert_eq!(InputMode::Discrepancy.prompt(), "Discrepancy detail");
    }
}
