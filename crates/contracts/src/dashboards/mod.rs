pub mod d400_operations_summary;
