//! Status command.

use console::style;

use crate::classifier::{load_classifier, ModelStatus};
use crate::config::Settings;
use crate::extract::Extractors;

/// Print model status, extractor availability and resolved paths.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let (_, model_status) = load_classifier(&settings.model_path);
    let extractors = Extractors::detect(&settings.extractor_options());

    println!("\n{}", style("Moodify Status").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Data Directory:", settings.data_dir.display());
    println!("{:<20} {}", "Uploads:", settings.uploads_dir.display());
    println!("{:<20} {}", "Model Path:", settings.model_path.display());

    let marker = match model_status {
        ModelStatus::Loaded { .. } => style("✓").green(),
        ModelStatus::Missing { .. } => style("!").yellow(),
        ModelStatus::Invalid { .. } => style("✗").red(),
    };
    println!("{:<20} {} {}", "Model:", marker, model_status);

    println!("\n{}", style("Extractors").bold());
    for backend in extractors.availability() {
        if backend.available {
            println!("  {} .{}", style("✓").green(), backend.format);
        } else {
            println!(
                "  {} .{} ({})",
                style("✗").red(),
                backend.format,
                style(backend.hint).dim()
            );
        }
    }

    if settings.uses_default_secret() {
        println!(
            "\n{} Session secret is the built-in default; set MOODIFY_SECRET",
            style("!").yellow()
        );
    }

    Ok(())
}
