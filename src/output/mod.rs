pub mod export;
pub mod formatter;

pub use export::{
    default_export_filename, render_export, to_csv, to_json, write_export, ExportFormat,
};
pub use formatter::{
    format_number, format_results, format_scores, should_use_colors, DisplayOptions,
};
