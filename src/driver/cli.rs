use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal;
use thiserror::Error;

use crate::engine::{EstimateBundle, Estimator};
use crate::error::EstimateError;
use crate::render::{AnsiRenderer, PreviewSettings};

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error(transparent)]
    Estimate(#[from] EstimateError),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Output shape for a one-shot estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The bundle as pretty-printed JSON.
    Json,
    /// A readable report followed by a floor-plan preview.
    Report,
}

/// One-shot terminal front end over an [`Estimator`].
pub struct CliDriver {
    estimator: Estimator,
    format: OutputFormat,
    preview: PreviewSettings,
}

impl CliDriver {
    pub fn new(estimator: Estimator, format: OutputFormat) -> Self {
        Self {
            estimator,
            format,
            preview: PreviewSettings::default(),
        }
    }

    /// Size the preview to the terminal, leaving a margin.
    pub fn fit_to_terminal(mut self) -> Self {
        if let Ok((width, _)) = terminal::size() {
            self.preview.columns = width.saturating_sub(4).clamp(16, 80);
        }
        self
    }

    pub fn with_preview(mut self, preview: PreviewSettings) -> Self {
        self.preview = preview;
        self
    }

    pub fn run(
        &self,
        writer: &mut impl Write,
        area: &str,
        floors: &str,
        wage: &str,
        cost: &str,
    ) -> DriverResult<EstimateBundle> {
        let bundle = self.estimator.estimate_raw(area, floors, wage, cost)?;
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, &bundle)?;
                writeln!(writer)?;
            }
            OutputFormat::Report => self.report(writer, &bundle)?,
        }
        writer.flush()?;
        Ok(bundle)
    }

    fn report(&self, writer: &mut impl Write, bundle: &EstimateBundle) -> io::Result<()> {
        let currency = &self.estimator.config().units.currency;

        heading(writer, "Estimate")?;
        writeln!(
            writer,
            "  {} floors, {} total area",
            bundle.total_floors, bundle.total_area
        )?;
        writeln!(
            writer,
            "  {} workers for {} days",
            bundle.workers, bundle.duration_days
        )?;
        writeln!(writer, "  labor     {currency}{:.2}", bundle.labor_cost())?;
        writeln!(writer, "  materials {currency}{:.2}", bundle.material_cost())?;
        writeln!(writer, "  total     {currency}{:.2}", bundle.total_cost())?;

        heading(writer, "Crew")?;
        for allocation in &bundle.workforce.roles {
            writeln!(
                writer,
                "  {:<14} {:>4}  {}",
                allocation.role.key(),
                allocation.count,
                allocation.duty
            )?;
        }

        heading(writer, "Materials")?;
        let materials = &bundle.materials;
        writeln!(writer, "  cement {} bags", materials.cement_bags)?;
        writeln!(writer, "  steel  {} kg", materials.steel_kg)?;
        writeln!(writer, "  sand   {} tons", materials.sand_tons)?;
        writeln!(writer, "  bricks {}", materials.bricks)?;

        heading(writer, "Alternative plans")?;
        for plan in &bundle.alternative_plans {
            writeln!(
                writer,
                "  {:<14} {:>4} workers {:>6} days  {currency}{:.2}",
                plan.name, plan.workers, plan.duration_days, plan.total_cost
            )?;
        }

        heading(writer, "Floor plan")?;
        if let Some(path) = &bundle.floorplan {
            writeln!(writer, "  saved to {path}")?;
        }
        for warning in &bundle.warnings {
            writeln!(writer, "  warning: {warning}")?;
        }
        AnsiRenderer::new(self.preview.clone()).render(writer, &bundle.floorplan_layout)
    }
}

fn heading(writer: &mut impl Write, title: &str) -> io::Result<()> {
    writer
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print(format!("\n{title}\n")))?
        .queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_driver(format: OutputFormat) -> CliDriver {
        CliDriver::new(Estimator::with_default(), format).with_preview(PreviewSettings {
            columns: 30,
            color: None,
        })
    }

    #[test]
    fn json_output_round_trips_the_bundle() {
        let mut output = Vec::new();
        let bundle = plain_driver(OutputFormat::Json)
            .run(&mut output, "1000", "G+1", "500", "2000")
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["workers"], bundle.workers);
        assert_eq!(value["worker_breakdown"]["helpers"]["count"], 3);
    }

    #[test]
    fn report_lists_crew_and_preview() {
        let mut output = Vec::new();
        plain_driver(OutputFormat::Report)
            .run(&mut output, "1000", "G+1", "500", "2000")
            .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("11 workers for 181 days"));
        assert!(text.contains("supervisors"));
        assert!(text.contains("Budget Saver"));
        assert!(text.contains('┌'));
    }

    #[test]
    fn invalid_input_surfaces_as_estimate_error() {
        let mut output = Vec::new();
        let err = plain_driver(OutputFormat::Report)
            .run(&mut output, "1000", "G+x", "500", "2000")
            .unwrap_err();
        assert!(matches!(err, CliDriverError::Estimate(_)));
        assert!(output.is_empty());
    }
}
