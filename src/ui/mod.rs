// Display formatting module

pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_gpu, format_percent, format_rate, format_reading, format_size, render_pass};
