//! One-shot classification command.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use crate::classifier::load_classifier;
use crate::config::Settings;
use crate::extract::Extractors;
use crate::pipeline::{Pipeline, PipelineReport, PredictInput, TextOrigin};
use crate::stats::StatsAggregator;

/// Classify a file or a piece of text and print the report.
pub async fn cmd_classify(
    settings: &Settings,
    text: Option<&str>,
    file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let input = match file {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("File not found: {}", path.display());
            }
            PredictInput::File(path)
        }
        None => PredictInput::choose(text.unwrap_or_default(), None)
            .ok_or_else(|| anyhow::anyhow!("Provide --text or a file to classify"))?,
    };

    let (classifier, model_status) = load_classifier(&settings.model_path);
    tracing::info!("{}", model_status);

    let pipeline = Pipeline::new(
        Arc::new(classifier),
        Arc::new(Extractors::detect(&settings.extractor_options())),
        Arc::new(StatsAggregator::new()),
        settings.uploads_dir.clone(),
        settings.top_words,
    );
    let report = pipeline.run(input).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &PipelineReport) {
    let label = match report.classified_by {
        "degraded" => style(report.prediction.label.as_str()).red(),
        _ => style(report.prediction.label.as_str()).green(),
    };
    println!(
        "\n{} {} {}",
        style("Label:").bold(),
        label.bold(),
        style(format!("({})", report.classified_by)).dim()
    );

    match report.origin {
        TextOrigin::ExtractionUnavailable => println!(
            "{} No extractor installed for this file type; classified empty text",
            style("!").yellow()
        ),
        TextOrigin::ExtractionFailed => println!(
            "{} Text extraction failed; classified empty text",
            style("!").yellow()
        ),
        TextOrigin::Typed | TextOrigin::Extracted => {}
    }

    if !report.prediction.labels.is_empty() {
        println!("\n{}", style("Scores").bold());
        for (label, score) in report
            .prediction
            .labels
            .iter()
            .zip(report.prediction.scores.iter())
        {
            println!("  {:<20} {:.4}", label, score);
        }
    }

    if !report.top_words.is_empty() {
        println!("\n{}", style("Top words").bold());
        for w in &report.top_words {
            println!("  {:<20} {}", w.word, w.count);
        }
    }

    if !report.summary.is_empty() {
        println!("\n{}", style("Summary").bold());
        println!("  {}", report.summary);
    }

    let digits: Vec<String> = report
        .digits
        .iter()
        .map(|d| format!("{}:{}", d.digit, d.count))
        .collect();
    println!("\n{} {}", style("Digits").bold(), digits.join(" "));
}
