mod dashboard;

pub use dashboard::OperationsSummaryDashboard;
