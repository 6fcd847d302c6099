//! UI widgets for displaying sensor data.

pub mod help;
pub mod readings;
pub mod status_bar;

pub use help::render_help;
pub use readings::render_readings;
pub use status_bar::{StatusInfo, render_status_bar};
