//! CLI logic for the Nagare diagram tool.
//!
//! This module contains the core CLI logic: it loads configuration, compiles
//! the input file and writes the resulting layout as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::{info, warn};

use nagare::{DiagramBuilder, NagareError, layout::Layout};

/// Run the Nagare CLI application
///
/// This function processes the input file through the Nagare pipeline and
/// writes the resulting layout to the output file. Layout warnings are
/// reported through the logger and do not fail the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `NagareError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<Layout, NagareError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::with_canvas_overrides(app_config, args.width, args.height)?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let tree = builder.parse(&source)?;
    let layout = builder.layout(&tree);

    for reportable in error_adapter::warnings_to_reportables(layout.diagnostics(), &source) {
        warn!("{}", error_adapter::render(&reportable));
    }

    let json = serde_json::to_string_pretty(&layout).map_err(io::Error::from)?;
    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        warnings = layout.diagnostics().len();
        "Layout exported successfully"
    );

    Ok(layout)
}
