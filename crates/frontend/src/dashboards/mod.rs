pub mod d400_operations_summary;

pub use d400_operations_summary::ui::OperationsSummaryDashboard;
