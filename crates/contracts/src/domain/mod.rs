pub mod a001_staff;
pub mod a002_shift;
pub mod a003_vendor;
pub mod a004_inventory_item;
pub mod a005_expense;
pub mod a006_kitchen_order;
pub mod a007_payroll_entry;
pub mod common;
