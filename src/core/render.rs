pub use crate::domain::model::OutputFormat;

use crate::domain::model::ElapsedBreakdown;
use crate::utils::error::Result;

pub fn render(breakdown: &ElapsedBreakdown, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(breakdown)),
        OutputFormat::Json => render_json(breakdown),
    }
}

pub fn render_text(breakdown: &ElapsedBreakdown) -> String {
    format!(
        "LIVE AGE COUNTER\n\
         ----------------------\n\
         {} years\n\
         {} months\n\
         {} days\n\
         {} hours\n\
         {} minutes\n\
         {} seconds",
        breakdown.years,
        breakdown.months,
        breakdown.days,
        breakdown.hours,
        breakdown.minutes,
        breakdown.seconds
    )
}

pub fn render_json(breakdown: &ElapsedBreakdown) -> Result<String> {
    Ok(serde_json::to_string(breakdown)?)
}
