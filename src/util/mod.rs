
/// Rounding and text formatting for numeric table cells
pub mod number_format;
/// Helper functions for generating the progress bars
pub mod progress_bar;
