//! App Shell
//!
//! Session-scoped controller composing navigation, gating, page view models
//! and async fetch plumbing.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use cargoops_core::repositories::WarehouseRepository;
use cargoops_core::services::{MenuEntry, Navigator, PermissionGate};
use cargoops_core::{
    DomainError, MenuTree, NavigationState, Package, PickOrder, PickSlip, QualityFlag, RoleAllowList, Session,
    StoringOrder,
};
use cargoops_shared::constants::{ACCESS_DENIED_MESSAGE, ADMIN_ROLE};

use crate::events::{AppEvent, MountId};
use crate::notice::{Notice, Notices};
use crate::viewmodel::{
    BinningViewModel, DrillDownViewModel, InventoryViewModel, QualityCheckViewModel, ReceivedOrdersViewModel,
    ReceivingViewModel,
};

/// The page mounted for the current menu key.
pub enum Page {
    StoringOrders(DrillDownViewModel<StoringOrder, Package>),
    PickSlips(DrillDownViewModel<PickSlip, PickOrder>),
    BinAssignment(BinningViewModel),
    Receiving(ReceivingViewModel),
    ReceivedOrders(ReceivedOrdersViewModel),
    QualityCheck(QualityCheckViewModel),
    Inventory(InventoryViewModel),
    /// Informational page without remote data.
    Static,
}

impl Page {
    pub fn for_key(menu_key: &str, session: &Session) -> Self {
        match menu_key {
            "storingorder/list" => Page::StoringOrders(DrillDownViewModel::new()),
            "picking/pickslip" | "picking/mypicking" => Page::PickSlips(DrillDownViewModel::new()),
            "binning/assign" => Page::BinAssignment(BinningViewModel::new()),
            "receiving/soreceiving" => Page::Receiving(ReceivingViewModel::new()),
            "receiving/list" => {
                // admins review every receiver's orders
                let receiver = (session.role != ADMIN_ROLE).then(|| session.employee_id.clone());
                Page::ReceivedOrders(ReceivedOrdersViewModel::new(receiver))
            }
            "tq/package" => Page::QualityCheck(QualityCheckViewModel::new()),
            "inventory/management" => Page::Inventory(InventoryViewModel::new()),
            _ => Page::Static,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::StoringOrders(_) => "storing_orders",
            Page::PickSlips(_) => "pick_slips",
            Page::BinAssignment(_) => "bin_assignment",
            Page::Receiving(_) => "receiving",
            Page::ReceivedOrders(_) => "received_orders",
            Page::QualityCheck(_) => "quality_check",
            Page::Inventory(_) => "inventory",
            Page::Static => "static",
        }
    }
}

fn spawn_fetch<F>(tx: &mpsc::UnboundedSender<AppEvent>, fetch: F)
where
    F: Future<Output = AppEvent> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = fetch.await;
        if tx.send(event).is_err() {
            debug!("Shell gone before fetch completed");
        }
    });
}

pub struct AppShell {
    session: Session,
    navigator: Navigator,
    repository: Arc<dyn WarehouseRepository>,
    page: Page,
    mount_id: MountId,
    notices: Notices,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl AppShell {
    /// Build the shell for a signed-in session and mount the root page.
    ///
    /// Must be called inside a tokio runtime; page loads are spawned tasks.
    pub fn sign_in(
        session: Session,
        tree: Arc<MenuTree>,
        allow: Arc<RoleAllowList>,
        repository: Arc<dyn WarehouseRepository>,
    ) -> Self {
        info!(session_id = %session.id, role = %session.role, employee_id = %session.employee_id, "Signed in");
        let gate = PermissionGate::new(allow, session.role.clone());
        let navigator = Navigator::new(tree, gate);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut shell = Self {
            session,
            page: Page::Static,
            navigator,
            repository,
            mount_id: 0,
            notices: Notices::new(),
            event_tx,
            event_rx,
        };
        shell.mount();
        shell
    }

    pub fn sign_out(self) {
        info!(session_id = %self.session.id, role = %self.session.role, "Signed out");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.navigator.menu_entries()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Menu click. Denied keys only raise a warning.
    pub fn select_menu(&mut self, menu_key: &str) -> bool {
        let before = self.navigator.state().resolved_menu_key.clone();
        let moved = self
            .navigator
            .navigate_to_key(menu_key)
            .map(|state| state.resolved_menu_key != before);
        self.after_navigation(moved)
    }

    /// Typed or deep-linked path, gated like a menu click.
    pub fn navigate_path(&mut self, path: &str) -> bool {
        let before = self.navigator.state().resolved_menu_key.clone();
        let moved = self
            .navigator
            .navigate_to_path(path)
            .map(|state| state.resolved_menu_key != before);
        self.after_navigation(moved)
    }

    fn after_navigation(&mut self, moved: Result<bool, DomainError>) -> bool {
        match moved {
            Ok(changed) => {
                if changed {
                    self.mount();
                }
                true
            }
            Err(_) => {
                self.notices.push(Notice::warning(ACCESS_DENIED_MESSAGE));
                false
            }
        }
    }

    fn mount(&mut self) {
        self.mount_id += 1;
        let key = self.navigator.state().resolved_menu_key.clone();
        self.page = Page::for_key(&key, &self.session);
        info!(menu_key = %key, mount = self.mount_id, page = self.page.name(), "Page mounted");
        self.refresh();
    }

    /// Reload the page's lists (and the active tab's details).
    pub fn refresh(&mut self) {
        let mount = self.mount_id;
        let repo = Arc::clone(&self.repository);
        let tx = &self.event_tx;

        match &mut self.page {
            Page::StoringOrders(vm) => {
                let seq = vm.begin_refresh();
                let list_repo = Arc::clone(&repo);
                spawn_fetch(tx, async move {
                    AppEvent::StoringOrdersLoaded {
                        mount,
                        seq,
                        result: list_repo.storing_orders().await,
                    }
                });
                if let Some(ticket) = vm.active().map(str::to_string).and_then(|id| vm.fetch_children(&id)) {
                    spawn_fetch(tx, async move {
                        let result = repo.packages(Some(ticket.entity_id.as_str())).await;
                        AppEvent::PackagesLoaded { mount, ticket, result }
                    });
                }
            }
            Page::PickSlips(vm) => {
                let seq = vm.begin_refresh();
                let list_repo = Arc::clone(&repo);
                spawn_fetch(tx, async move {
                    AppEvent::PickSlipsLoaded {
                        mount,
                        seq,
                        result: list_repo.pick_slips().await,
                    }
                });
                if let Some(ticket) = vm.active().map(str::to_string).and_then(|id| vm.fetch_children(&id)) {
                    spawn_fetch(tx, async move {
                        let result = repo.pick_orders(Some(ticket.entity_id.as_str())).await;
                        AppEvent::PickOrdersLoaded { mount, ticket, result }
                    });
                }
            }
            Page::BinAssignment(vm) => {
                let seq = vm.begin_refresh();
                spawn_fetch(tx, async move {
                    AppEvent::PackageListLoaded {
                        mount,
                        seq,
                        result: repo.packages(None).await,
                    }
                });
            }
            Page::QualityCheck(vm) => {
                let seq = vm.begin_refresh();
                spawn_fetch(tx, async move {
                    AppEvent::PackageListLoaded {
                        mount,
                        seq,
                        result: repo.packages(None).await,
                    }
                });
            }
            Page::ReceivedOrders(vm) => {
                let seq = vm.begin_refresh();
                spawn_fetch(tx, async move {
                    AppEvent::StoringOrdersLoaded {
                        mount,
                        seq,
                        result: repo.storing_orders().await,
                    }
                });
            }
            Page::Inventory(vm) => {
                let seq = vm.begin_refresh();
                spawn_fetch(tx, async move {
                    AppEvent::InventoryLoaded {
                        mount,
                        seq,
                        result: repo.inventory().await,
                    }
                });
            }
            Page::Receiving(_) | Page::Static => {}
        }
    }

    // ------------------------------------------------------------------------
    // Drill-down tabs
    // ------------------------------------------------------------------------

    pub fn open_tab(&mut self, entity_id: &str) {
        let mount = self.mount_id;
        let repo = Arc::clone(&self.repository);
        let tx = &self.event_tx;

        match &mut self.page {
            Page::StoringOrders(vm) => {
                if let Some(ticket) = vm.open(entity_id) {
                    spawn_fetch(tx, async move {
                        let result = repo.packages(Some(ticket.entity_id.as_str())).await;
                        AppEvent::PackagesLoaded { mount, ticket, result }
                    });
                }
            }
            Page::PickSlips(vm) => {
                if let Some(ticket) = vm.open(entity_id) {
                    spawn_fetch(tx, async move {
                        let result = repo.pick_orders(Some(ticket.entity_id.as_str())).await;
                        AppEvent::PickOrdersLoaded { mount, ticket, result }
                    });
                }
            }
            _ => debug!(entity_id, "Page has no tabs"),
        }
    }

    pub fn switch_tab(&mut self, entity_id: &str) -> bool {
        match &mut self.page {
            Page::StoringOrders(vm) => vm.switch(entity_id),
            Page::PickSlips(vm) => vm.switch(entity_id),
            _ => false,
        }
    }

    pub fn close_tab(&mut self, entity_id: &str) -> bool {
        match &mut self.page {
            Page::StoringOrders(vm) => vm.close(entity_id),
            Page::PickSlips(vm) => vm.close(entity_id),
            _ => false,
        }
    }

    pub fn set_filter(&mut self, filter: &str) {
        match &mut self.page {
            Page::StoringOrders(vm) => vm.set_filter(filter),
            Page::PickSlips(vm) => vm.set_filter(filter),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Page actions
    // ------------------------------------------------------------------------

    pub fn allocate_bins(&mut self, package_id: &str) {
        let Page::BinAssignment(vm) = &mut self.page else {
            return;
        };
        match vm.begin_allocation(package_id) {
            Ok(package_id) => {
                let mount = self.mount_id;
                let repo = Arc::clone(&self.repository);
                spawn_fetch(&self.event_tx, async move {
                    let result = repo.allocate_bins(&package_id).await;
                    AppEvent::BinsAllocated { mount, package_id, result }
                });
            }
            Err(e) => self.notices.push(Notice::from_error(&e)),
        }
    }

    pub fn scan(&mut self, value: &str) {
        if let Page::Receiving(vm) = &mut self.page {
            vm.scan(value, &mut self.notices);
        }
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        if let Page::Receiving(vm) = &mut self.page {
            vm.set_quantity(quantity, &mut self.notices);
        }
    }

    pub fn reset_scan(&mut self) {
        if let Page::Receiving(vm) = &mut self.page {
            vm.reset();
        }
    }

    pub fn submit_receipt(&mut self) {
        let Page::Receiving(vm) = &mut self.page else {
            return;
        };
        match vm.begin_submit(&self.session.employee_id) {
            Ok(receipt) => {
                let mount = self.mount_id;
                let repo = Arc::clone(&self.repository);
                spawn_fetch(&self.event_tx, async move {
                    let result = repo.receive_storing_order(&receipt).await;
                    AppEvent::ReceiptSubmitted { mount, receipt, result }
                });
            }
            Err(e) => self.notices.push(Notice::from_error(&e)),
        }
    }

    /// Save a discrepancy detail, from the receiving list (any listed order)
    /// or the receiving page (the last answered receipt).
    pub fn save_discrepancy(&mut self, storing_order_id: &str, detail: &str) {
        let begun = match &mut self.page {
            Page::ReceivedOrders(vm) => vm.begin_discrepancy(storing_order_id, detail),
            Page::Receiving(vm) => vm.begin_discrepancy(detail),
            _ => return,
        };
        match begun {
            Ok(update) => {
                let mount = self.mount_id;
                let repo = Arc::clone(&self.repository);
                spawn_fetch(&self.event_tx, async move {
                    let result = repo.save_discrepancy(&update).await;
                    AppEvent::DiscrepancySaved { mount, update, result }
                });
            }
            Err(e) => self.notices.push(Notice::from_error(&e)),
        }
    }

    pub fn search_package(&mut self, package_id: &str) {
        if let Page::QualityCheck(vm) = &mut self.page {
            vm.search(package_id, &mut self.notices);
        }
    }

    pub fn submit_quality_check(&mut self, flag: QualityFlag) {
        let Page::QualityCheck(vm) = &mut self.page else {
            return;
        };
        match vm.begin_check(flag, &self.session.employee_id) {
            Ok(check) => {
                let mount = self.mount_id;
                let repo = Arc::clone(&self.repository);
                spawn_fetch(&self.event_tx, async move {
                    let result = repo.submit_quality_check(&check).await;
                    AppEvent::QualityChecked { mount, check, result }
                });
            }
            Err(e) => self.notices.push(Notice::from_error(&e)),
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Apply every event already delivered, without waiting. Returns how many were applied.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            if self.apply_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next event and apply it. `Some(false)` means it was stale.
    pub async fn next_event(&mut self) -> Option<bool> {
        let event = self.event_rx.recv().await?;
        Some(self.apply_event(event))
    }

    pub fn apply_event(&mut self, event: AppEvent) -> bool {
        if event.mount() != self.mount_id {
            warn!(event = event.name(), mount = event.mount(), current = self.mount_id, "Discarding event for an unmounted page");
            return false;
        }

        let notices = &mut self.notices;
        let (applied, reload) = match (&mut self.page, event) {
            (Page::StoringOrders(vm), AppEvent::StoringOrdersLoaded { seq, result, .. }) => {
                (vm.apply_parents(seq, result, notices), false)
            }
            (Page::StoringOrders(vm), AppEvent::PackagesLoaded { ticket, result, .. }) => {
                (vm.apply_children(&ticket, result, notices), false)
            }
            (Page::PickSlips(vm), AppEvent::PickSlipsLoaded { seq, result, .. }) => {
                (vm.apply_parents(seq, result, notices), false)
            }
            (Page::PickSlips(vm), AppEvent::PickOrdersLoaded { ticket, result, .. }) => {
                (vm.apply_children(&ticket, result, notices), false)
            }
            (Page::BinAssignment(vm), AppEvent::PackageListLoaded { seq, result, .. }) => {
                (vm.apply_packages(seq, result, notices), false)
            }
            (Page::BinAssignment(vm), AppEvent::BinsAllocated { package_id, result, .. }) => {
                let allocated = vm.apply_allocation(package_id, result, notices);
                (true, allocated)
            }
            (Page::Receiving(vm), AppEvent::ReceiptSubmitted { receipt, result, .. }) => {
                vm.apply_receipt(receipt, result, notices);
                (true, false)
            }
            (Page::Receiving(vm), AppEvent::DiscrepancySaved { update, result, .. }) => {
                vm.apply_discrepancy(update, result, notices);
                (true, false)
            }
            (Page::ReceivedOrders(vm), AppEvent::StoringOrdersLoaded { seq, result, .. }) => {
                (vm.apply_orders(seq, result, notices), false)
            }
            (Page::ReceivedOrders(vm), AppEvent::DiscrepancySaved { update, result, .. }) => {
                vm.apply_discrepancy(update, result, notices);
                (true, false)
            }
            (Page::QualityCheck(vm), AppEvent::PackageListLoaded { seq, result, .. }) => {
                (vm.apply_packages(seq, result, notices), false)
            }
            (Page::QualityCheck(vm), AppEvent::QualityChecked { check, result, .. }) => {
                let recorded = vm.apply_check(check, result, notices);
                (true, recorded)
            }
            (Page::Inventory(vm), AppEvent::InventoryLoaded { seq, result, .. }) => {
                (vm.apply_bins(seq, result, notices), false)
            }
            (page, event) => {
                warn!(event = event.name(), page = page.name(), "Event does not match the mounted page");
                (false, false)
            }
        };

        if reload {
            self.refresh();
        }
        applied
    }
}
