//! `labsite validate`: check data files and the template.

use anyhow::Result;
use labsite_core::{ValidationReport, Validator};

use crate::ProcessExit;
use crate::app::context::SiteContext;
use crate::app::exit_handler::determine_validation_exit;
use crate::cli::ValidateArgs;

pub(crate) fn run_validate_command(ctx: &SiteContext, args: &ValidateArgs) -> Result<ProcessExit> {
    let validator = Validator::new(ctx.current_year, ctx.markers.regions());
    let mut report = ValidationReport::default();

    let news = validator.check_news_file(&ctx.paths.news, &mut report);
    let publications = validator.check_publications_file(&ctx.paths.publications, &mut report);
    validator.check_profile_file(&ctx.paths.profile, &mut report);
    validator.check_template_file(&ctx.paths.index, &mut report);

    println!("Checked {news} news items and {publications} publications");
    for finding in &report.findings {
        println!("{}: {finding}", finding.severity);
    }
    if report.is_clean() {
        println!("All checks passed");
    } else {
        println!(
            "{} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
    }

    Ok(determine_validation_exit(&report, args.strict))
}
