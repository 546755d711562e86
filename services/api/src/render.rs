use crate::infra::{load_rubric, load_scores_file};
use blindspot::config::AppConfig;
use blindspot::error::AppError;
use blindspot::report::{
    read_survey_results_from_path, RawScores, ReportScoringService, RespondentReport, Rubric,
    ScoredReport, SectionInsight,
};
use clap::{ArgGroup, Args};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["scores", "scores_file"])))]
pub(crate) struct ScoreArgs {
    /// Report rubric JSON document
    #[arg(long)]
    pub(crate) report: PathBuf,
    /// Comma-separated survey scores in catalog order
    #[arg(long)]
    pub(crate) scores: Option<String>,
    /// JSON file holding the survey scores as an array or delimited string
    #[arg(long)]
    pub(crate) scores_file: Option<PathBuf>,
    /// Limit the blindspots listed per section (0 lists every trait)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the scored report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Report rubric JSON document
    #[arg(long)]
    pub(crate) report: PathBuf,
    /// Survey results CSV export with respondent_id and e3_scales21 columns
    #[arg(long)]
    pub(crate) results: PathBuf,
}

fn scoring_service() -> Result<ReportScoringService, AppError> {
    let config = AppConfig::load()?;
    Ok(ReportScoringService::new(config.scales.load_catalog()?))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        report,
        scores,
        scores_file,
        top,
        json,
    } = args;

    let service = scoring_service()?;
    let rubric = load_rubric(report)?;
    let raw = match (scores, scores_file) {
        (Some(inline), _) => RawScores::from(inline.as_str()),
        (None, Some(path)) => service.parse_payload(load_scores_file(path)?)?,
        (None, None) => RawScores::Delimited(String::new()),
    };

    let scored = service.score(&rubric, &raw, None)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
        return Ok(());
    }

    let insights = service.insights(&rubric, &scored, top);
    print!("{}", render_report(&rubric, &scored, &insights));
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = scoring_service()?;
    let rubric = load_rubric(&args.report)?;
    let results = read_survey_results_from_path(&args.results)?;
    let reports = service.score_batch(&rubric, &results);

    print!("{}", render_batch(&rubric, &reports));
    Ok(())
}

pub(crate) fn render_report(
    rubric: &Rubric,
    report: &ScoredReport,
    insights: &[SectionInsight],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Blindspot report: {}\n", rubric.name));
    out.push_str(&format!("{} sections scored\n", report.len()));

    for insight in insights {
        out.push_str(&format!(
            "\n{} ({} blindspots, {} without data)\n",
            insight.section_name,
            insight.top_blindspots.len(),
            insight.uncomputable_traits
        ));
        for view in &insight.top_blindspots {
            out.push_str(&format!(
                "- {}: {:.2} [{}] {}\n",
                view.trait_name,
                view.score,
                view.threshold_label.as_deref().unwrap_or("unbanded"),
                view.threshold_color
            ));
            out.push_str(&format!("  {}\n", view.content));
        }
        if !insight.consolidated_actions.is_empty() {
            out.push_str("  Actions:\n");
            for action in &insight.consolidated_actions {
                if action.description.is_empty() {
                    out.push_str(&format!("    - {}\n", action.label));
                } else {
                    out.push_str(&format!("    - {}: {}\n", action.label, action.description));
                }
            }
        }
    }

    out
}

pub(crate) fn render_batch(rubric: &Rubric, reports: &[RespondentReport]) -> String {
    let mut out = String::new();
    let scored = reports.iter().filter(|report| report.outcome.is_ok()).count();
    out.push_str(&format!(
        "Blindspot batch: {} ({} of {} respondents scored)\n",
        rubric.name,
        scored,
        reports.len()
    ));

    for respondent in reports {
        match &respondent.outcome {
            Ok(report) => {
                let summary = report
                    .sections()
                    .iter()
                    .map(|section| {
                        let computable = section
                            .results
                            .iter()
                            .filter(|result| result.is_computable())
                            .count();
                        format!("{} {}/{}", section.section_name, computable, section.results.len())
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                out.push_str(&format!("- {}: {}\n", respondent.respondent_id, summary));
            }
            Err(err) => {
                out.push_str(&format!("- {}: skipped ({})\n", respondent.respondent_id, err));
            }
        }
    }

    out
}
