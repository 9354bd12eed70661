//! App shell behaviour against a mocked repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use cargoops_console::{AppShell, NoticeLevel, Page};
use cargoops_core::repositories::WarehouseRepository;
use cargoops_core::{
    BinMap, Dimensions, DiscrepancyUpdate, DomainError, FetchOutcome, InventoryBin, MenuTree, Package, PickOrder,
    PickSlip, QualityCheck, QualityFlag, ReceiveOutcome, ReceivingReceipt, RoleAllowList, Session, SkippedRecord,
    StoringOrder, READY_FOR_TQ,
};
use cargoops_shared::constants::ACCESS_DENIED_MESSAGE;

mock! {
    pub Repo {}

    #[async_trait]
    impl WarehouseRepository for Repo {
        async fn storing_orders(&self) -> Result<FetchOutcome<StoringOrder>, DomainError>;
        async fn packages<'life0, 'a>(&'life0 self, storing_order_id: Option<&'a str>) -> Result<FetchOutcome<Package>, DomainError>;
        async fn pick_slips(&self) -> Result<FetchOutcome<PickSlip>, DomainError>;
        async fn pick_orders<'life0, 'a>(&'life0 self, pick_slip_id: Option<&'a str>) -> Result<FetchOutcome<PickOrder>, DomainError>;
        async fn allocate_bins(&self, package_id: &str) -> Result<BinMap, DomainError>;
        async fn receive_storing_order(&self, receipt: &ReceivingReceipt) -> Result<ReceiveOutcome, DomainError>;
        async fn save_discrepancy(&self, update: &DiscrepancyUpdate) -> Result<(), DomainError>;
        async fn submit_quality_check(&self, check: &QualityCheck) -> Result<(), DomainError>;
        async fn inventory(&self) -> Result<FetchOutcome<InventoryBin>, DomainError>;
    }
}

fn storing_order(id: &str) -> StoringOrder {
    StoringOrder {
        storing_order_id: id.to_string(),
        customer_id: "C-1".into(),
        order_date: "2024-05-01".into(),
        invoice_number: format!("INV-{}", id),
        bill_of_entry_id: format!("BOE-{}", id),
        airway_bill_number: format!("AWB-{}", id),
        status: "OPEN".into(),
        ..StoringOrder::default()
    }
}

fn package(id: &str, storing_order_id: &str) -> Package {
    package_with_status(id, storing_order_id, "received")
}

fn package_with_status(id: &str, storing_order_id: &str, status: &str) -> Package {
    Package {
        package_id: id.to_string(),
        storing_order_id: storing_order_id.to_string(),
        product_id: "P-1".into(),
        quantity: 4,
        status: status.to_string(),
        dimensions: Dimensions::default(),
        bin_allocation: [("A-01".to_string(), 4)].into_iter().collect(),
        bin_current: BinMap::new(),
        bin_allocation_date: None,
    }
}

fn shell(role: &str, repo: MockRepo) -> AppShell {
    let tree = Arc::new(MenuTree::warehouse().unwrap());
    let allow = Arc::new(RoleAllowList::builtin(&tree));
    AppShell::sign_in(Session::new(role, "EMP-1", "secret-credential"), tree, allow, Arc::new(repo))
}

async fn drain(shell: &mut AppShell, events: usize) -> Vec<bool> {
    let mut applied = Vec::with_capacity(events);
    for _ in 0..events {
        applied.push(shell.next_event().await.unwrap());
    }
    applied
}

#[tokio::test]
async fn denied_menu_click_warns_and_keeps_page() {
    let mut shell = shell("binner", MockRepo::new());
    let mount = shell.mount_id();

    assert!(!shell.select_menu("dispatch/mypacking"));
    assert_eq!(shell.navigation().resolved_menu_key, "dashboard");
    assert_eq!(shell.mount_id(), mount);

    let notice = shell.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, ACCESS_DENIED_MESSAGE);
}

#[tokio::test]
async fn denied_deep_link_is_gated() {
    let mut shell = shell("receiver", MockRepo::new());
    assert!(!shell.navigate_path("/binning/assign"));
    assert!(shell.navigate_path("/receiving/soreceiving/extra"));
    assert_eq!(shell.navigation().breadcrumb, vec!["Home", "Receiving", "SO Receiving"]);
    assert!(matches!(shell.page(), Page::Receiving(_)));
}

#[tokio::test]
async fn menu_marks_disabled_items() {
    let shell = shell("tq_employee", MockRepo::new());
    let entries = shell.menu_entries();
    assert!(entries.iter().any(|e| e.key == "dispatch" && !e.enabled));
    assert!(entries.iter().any(|e| e.key == "tq/package" && e.enabled));
}

#[tokio::test]
async fn storing_order_tabs_show_scoped_packages() {
    let mut repo = MockRepo::new();
    repo.expect_storing_orders()
        .times(1)
        .returning(|| Ok(FetchOutcome::new(vec![storing_order("SO-1"), storing_order("SO-2")])));
    repo.expect_packages().returning(|_| {
        // the API ignores the filter and returns everything
        Ok(FetchOutcome::new(vec![package("PKG-1", "SO-1"), package("PKG-2", "SO-2")]))
    });

    let mut shell = shell("admin", repo);
    assert!(shell.select_menu("storingorder/list"));
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    shell.open_tab("SO-2");
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    let Page::StoringOrders(vm) = shell.page() else {
        panic!("expected storing order page");
    };
    assert_eq!(vm.parents().len(), 2);
    let visible = vm.visible_children();
    assert_eq!(visible.rows.len(), 1);
    assert_eq!(visible.rows[0].package_id, "PKG-2");
}

#[tokio::test]
async fn child_rows_arriving_after_close_are_discarded() {
    let mut repo = MockRepo::new();
    repo.expect_storing_orders()
        .returning(|| Ok(FetchOutcome::new(vec![storing_order("SO-1")])));
    repo.expect_packages()
        .returning(|_| Ok(FetchOutcome::new(vec![package("PKG-1", "SO-1")])));

    let mut shell = shell("admin", repo);
    shell.select_menu("storingorder/list");
    drain(&mut shell, 1).await;

    shell.open_tab("SO-1");
    assert!(shell.close_tab("SO-1"));
    assert_eq!(drain(&mut shell, 1).await, vec![false]);

    let Page::StoringOrders(vm) = shell.page() else {
        panic!("expected storing order page");
    };
    assert!(vm.workspace().is_empty());
    assert!(!vm.has_children_for("SO-1"));
    assert!(vm.visible_children().is_empty());
}

#[tokio::test]
async fn results_for_a_left_page_are_discarded() {
    let mut repo = MockRepo::new();
    repo.expect_pick_slips().returning(|| Ok(FetchOutcome::new(Vec::new())));

    let mut shell = shell("admin", repo);
    shell.select_menu("picking/pickslip");
    shell.select_menu("dashboard");

    assert_eq!(drain(&mut shell, 1).await, vec![false]);
    assert!(matches!(shell.page(), Page::Static));
}

#[tokio::test]
async fn network_failure_marks_list_failed() {
    let mut repo = MockRepo::new();
    repo.expect_pick_slips()
        .returning(|| Err(DomainError::network(Some(503), "unavailable")));

    let mut shell = shell("admin", repo);
    shell.select_menu("picking/pickslip");
    drain(&mut shell, 1).await;

    let Page::PickSlips(vm) = shell.page() else {
        panic!("expected pick slip page");
    };
    assert!(vm.parents().status().is_failed());
    assert_eq!(shell.notices().latest().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn skipped_records_raise_a_warning() {
    let mut repo = MockRepo::new();
    repo.expect_storing_orders().returning(|| {
        Ok(FetchOutcome {
            rows: vec![storing_order("SO-1")],
            skipped: vec![SkippedRecord {
                index: 1,
                reason: "missing storing_order_id".into(),
            }],
        })
    });

    let mut shell = shell("admin", repo);
    shell.select_menu("storingorder/list");
    drain(&mut shell, 1).await;

    let notice = shell.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.starts_with('1'));
}

#[tokio::test]
async fn successful_allocation_reloads_binned_list() {
    let mut repo = MockRepo::new();
    repo.expect_packages()
        .times(2)
        .returning(|_| Ok(FetchOutcome::new(vec![package("PKG-1", "SO-1")])));
    repo.expect_allocate_bins()
        .withf(|id| id.to_string() == "PKG-1")
        .returning(|_| Ok([("A-01".to_string(), 4)].into_iter().collect()));

    let mut shell = shell("binner", repo);
    shell.select_menu("binning/assign");
    drain(&mut shell, 1).await;

    shell.allocate_bins("PKG-1");
    assert_eq!(drain(&mut shell, 2).await, vec![true, true]);

    let Page::BinAssignment(vm) = shell.page() else {
        panic!("expected bin assignment page");
    };
    assert_eq!(vm.rows().len(), 1);
    assert_eq!(vm.last_allocation.as_ref().unwrap().0, "PKG-1");
}

#[tokio::test]
async fn receiving_scan_and_submit() {
    let mut repo = MockRepo::new();
    repo.expect_receive_storing_order()
        .withf(|receipt| receipt.storing_order_id == "SO-1" && receipt.quantity == 2 && receipt.employee_id == "EMP-1")
        .returning(|_| Ok(ReceiveOutcome::Passed));

    let mut shell = shell("receiver", repo);
    shell.select_menu("receiving/soreceiving");

    shell.scan("SO-1");
    shell.submit_receipt();
    assert_eq!(shell.notices().latest().unwrap().level, NoticeLevel::Warning);

    for value in ["INV-1", "BOE-1", "AWB-1"] {
        shell.scan(value);
    }
    shell.set_quantity(2);
    shell.submit_receipt();
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    assert_eq!(shell.notices().latest().unwrap().level, NoticeLevel::Success);
    let Page::Receiving(vm) = shell.page() else {
        panic!("expected receiving page");
    };
    assert_eq!(vm.last_result.as_ref().unwrap().1, ReceiveOutcome::Passed);
}

#[tokio::test]
async fn receipt_lost_to_network_keeps_scans() {
    let mut repo = MockRepo::new();
    repo.expect_receive_storing_order()
        .times(1)
        .returning(|_| Err(DomainError::network(None, "connection reset")));

    let mut shell = shell("receiver", repo);
    shell.select_menu("receiving/soreceiving");
    for value in ["SO-1", "INV-1", "BOE-1", "AWB-1"] {
        shell.scan(value);
    }
    shell.set_quantity(3);
    shell.submit_receipt();
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    assert_eq!(shell.notices().latest().unwrap().level, NoticeLevel::Error);
    let Page::Receiving(vm) = shell.page() else {
        panic!("expected receiving page");
    };
    assert!(!vm.submitting);
    assert!(vm.workflow.is_complete());
    assert_eq!(vm.workflow.quantity(), 3);
    assert_eq!(vm.workflow.submit("EMP-1").unwrap().storing_order_id, "SO-1");
}

#[tokio::test]
async fn quality_check_pass_reloads_packages() {
    let mut repo = MockRepo::new();
    repo.expect_packages()
        .times(2)
        .returning(|_| Ok(FetchOutcome::new(vec![package_with_status("PKG-7", "SO-1", READY_FOR_TQ)])));
    repo.expect_submit_quality_check()
        .withf(|check| check.package_id == "PKG-7" && check.employee_id == "EMP-1" && check.flag == QualityFlag::Pass)
        .times(1)
        .returning(|_| Ok(()));

    let mut shell = shell("tq_employee", repo);
    assert!(shell.select_menu("tq/package"));
    drain(&mut shell, 1).await;

    shell.search_package("PKG-7");
    shell.submit_quality_check(QualityFlag::Pass);
    assert_eq!(drain(&mut shell, 2).await, vec![true, true]);

    assert!(shell
        .notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Success && n.message.contains("PKG-7")));
    let Page::QualityCheck(vm) = shell.page() else {
        panic!("expected quality check page");
    };
    assert!(vm.selected.is_none());
    assert!(vm.submitting.is_none());
}

#[tokio::test]
async fn quality_check_without_selection_is_rejected() {
    let mut repo = MockRepo::new();
    repo.expect_packages().returning(|_| Ok(FetchOutcome::new(Vec::new())));
    repo.expect_submit_quality_check().never();

    let mut shell = shell("tq_employee", repo);
    shell.select_menu("tq/package");
    drain(&mut shell, 1).await;

    shell.search_package("PKG-404");
    shell.submit_quality_check(QualityFlag::Fail);
    assert_eq!(shell.notices().latest().unwrap().level, NoticeLevel::Warning);
}

#[tokio::test]
async fn inventory_page_lists_floor_bins() {
    let mut repo = MockRepo::new();
    repo.expect_inventory().times(1).returning(|| {
        Ok(FetchOutcome::new(vec![
            InventoryBin {
                bin_id: "BIN5".into(),
                product_id: "P-2".into(),
                quantity: 6,
            },
            InventoryBin {
                bin_id: "BIN2".into(),
                product_id: "P-1".into(),
                quantity: 1,
            },
        ]))
    });

    let mut shell = shell("admin", repo);
    assert!(shell.select_menu("inventory/management"));
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    let Page::Inventory(vm) = shell.page() else {
        panic!("expected inventory page");
    };
    assert_eq!(vm.rack(1)[0].bin_id, "BIN2");
    assert_eq!(vm.rack(2)[0].bin_id, "BIN5");
    assert_eq!(vm.total_quantity(), 7);
}

#[tokio::test]
async fn receiving_list_saves_discrepancy() {
    let mut repo = MockRepo::new();
    repo.expect_storing_orders().times(1).returning(|| {
        let mut received = storing_order("SO-1");
        received.receiver_id = "RCV-9".into();
        received.doc_inspection_result = "FAIL".into();
        Ok(FetchOutcome::new(vec![received, storing_order("SO-2")]))
    });
    repo.expect_save_discrepancy()
        .withf(|update| update.storing_order_id == "SO-1" && update.discrepancy_detail == "2 cartons short")
        .times(1)
        .returning(|_| Ok(()));

    let mut shell = shell("admin", repo);
    assert!(shell.select_menu("receiving/list"));
    drain(&mut shell, 1).await;

    shell.save_discrepancy("SO-1", "  2 cartons short ");
    assert_eq!(drain(&mut shell, 1).await, vec![true]);

    let Page::ReceivedOrders(vm) = shell.page() else {
        panic!("expected receiving list page");
    };
    assert_eq!(vm.rows().len(), 1);
    assert_eq!(vm.current_detail("SO-1"), Some("2 cartons short"));
    assert_eq!(shell.notices().latest().unwrap().message, "Saved for SO-1");
}
