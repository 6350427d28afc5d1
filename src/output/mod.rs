// Output module - Output formatting (Table, JSON) and progress display

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub mod json;
pub mod progress;
pub mod table;

pub use progress::SpinnerProgress;
pub use table::{StreamingTable, TableFormatter};
