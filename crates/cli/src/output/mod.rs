pub mod banner;
mod format;
mod table;
pub mod theme;

pub use format::{
    caret_line, print_error, print_info, print_json, print_success, print_tick_error, OutputMode,
};
pub use table::{build_table, method_cell};
