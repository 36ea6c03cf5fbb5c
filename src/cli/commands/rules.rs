//! Rules command - List the loaded rule catalog

use super::{load_catalog, OutputFormat, RulesArgs};
use crate::cli::exit_codes;
use crate::cli::output::{CatalogRenderer, JsonOutput, TerminalOutput};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::CloudReviewError;

pub async fn execute(global: &GlobalOptions, args: &RulesArgs) -> Result<i32, CloudReviewError> {
    let config = Config::load(global.config.as_deref())?;
    let catalog = load_catalog(global.rules.as_deref(), &config)?;

    let renderer: Box<dyn CatalogRenderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
    };

    print!("{}", renderer.render_catalog(&catalog)?);
    Ok(exit_codes::SUCCESS)
}
