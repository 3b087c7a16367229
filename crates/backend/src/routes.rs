use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Staff
        // ========================================
        .route(
            "/api/staff",
            get(handlers::a001_staff::list_all).post(handlers::a001_staff::upsert),
        )
        .route(
            "/api/staff/testdata",
            post(handlers::a001_staff::insert_test_data),
        )
        .route(
            "/api/staff/:id",
            get(handlers::a001_staff::get_by_id).delete(handlers::a001_staff::delete),
        )
        // ========================================
        // A002 Shift
        // ========================================
        .route(
            "/api/shift",
            get(handlers::a002_shift::list).post(handlers::a002_shift::upsert),
        )
        .route("/api/shift/week", get(handlers::a002_shift::week))
        .route(
            "/api/shift/testdata",
            post(handlers::a002_shift::insert_test_data),
        )
        .route(
            "/api/shift/:id",
            get(handlers::a002_shift::get_by_id).delete(handlers::a002_shift::delete),
        )
        // ========================================
        // A003 Vendor
        // ========================================
        .route(
            "/api/vendor",
            get(handlers::a003_vendor::list_all).post(handlers::a003_vendor::upsert),
        )
        .route(
            "/api/vendor/testdata",
            post(handlers::a003_vendor::insert_test_data),
        )
        .route(
            "/api/vendor/:id",
            get(handlers::a003_vendor::get_by_id).delete(handlers::a003_vendor::delete),
        )
        // ========================================
        // A004 Inventory
        // ========================================
        .route(
            "/api/inventory",
            get(handlers::a004_inventory_item::list_all)
                .post(handlers::a004_inventory_item::upsert),
        )
        .route(
            "/api/inventory/buckets",
            get(handlers::a004_inventory_item::buckets),
        )
        .route(
            "/api/inventory/reorder",
            get(handlers::a004_inventory_item::reorder),
        )
        .route(
            "/api/inventory/testdata",
            post(handlers::a004_inventory_item::insert_test_data),
        )
        .route(
            "/api/inventory/:id",
            get(handlers::a004_inventory_item::get_by_id)
                .delete(handlers::a004_inventory_item::delete),
        )
        .route(
            "/api/inventory/:id/adjust",
            post(handlers::a004_inventory_item::adjust),
        )
        // ========================================
        // A005 Expense
        // ========================================
        .route(
            "/api/expense",
            get(handlers::a005_expense::list).post(handlers::a005_expense::upsert),
        )
        .route("/api/expense/summary", get(handlers::a005_expense::summary))
        .route(
            "/api/expense/testdata",
            post(handlers::a005_expense::insert_test_data),
        )
        .route(
            "/api/expense/:id",
            get(handlers::a005_expense::get_by_id).delete(handlers::a005_expense::delete),
        )
        // ========================================
        // A006 Kitchen order
        // ========================================
        .route(
            "/api/kitchen_order",
            get(handlers::a006_kitchen_order::list_all).post(handlers::a006_kitchen_order::upsert),
        )
        .route(
            "/api/kitchen_order/active",
            get(handlers::a006_kitchen_order::list_active),
        )
        .route(
            "/api/kitchen_order/settings",
            get(handlers::a006_kitchen_order::board_settings),
        )
        .route(
            "/api/kitchen_order/testdata",
            post(handlers::a006_kitchen_order::insert_test_data),
        )
        .route(
            "/api/kitchen_order/:id",
            get(handlers::a006_kitchen_order::get_by_id)
                .delete(handlers::a006_kitchen_order::delete),
        )
        .route(
            "/api/kitchen_order/:id/status",
            post(handlers::a006_kitchen_order::set_status),
        )
        .route(
            "/api/kitchen_order/:id/items/:item_id/status",
            post(handlers::a006_kitchen_order::set_item_status),
        )
        // ========================================
        // A007 Payroll
        // ========================================
        .route("/api/payroll", get(handlers::a007_payroll_entry::list))
        .route(
            "/api/payroll/generate",
            post(handlers::a007_payroll_entry::generate),
        )
        .route(
            "/api/payroll/:id",
            get(handlers::a007_payroll_entry::get_by_id)
                .post(handlers::a007_payroll_entry::adjust)
                .delete(handlers::a007_payroll_entry::delete),
        )
        .route(
            "/api/payroll/:id/approve",
            post(handlers::a007_payroll_entry::approve),
        )
        .route(
            "/api/payroll/:id/pay",
            post(handlers::a007_payroll_entry::mark_paid),
        )
        // ========================================
        // Notifications, equipment, dashboards
        // ========================================
        .route("/api/notifications", get(handlers::notifications::list))
        .route(
            "/api/equipment/temperatures",
            get(handlers::equipment::temperatures),
        )
        .route(
            "/api/d400/summary",
            get(handlers::d400_operations_summary::get_summary),
        )
        // ========================================
        // System log
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
