use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use survey_qc::report::{CoverageSummary, QcSummary};
use survey_qc::schema::HouseholdColumns;
use survey_qc::{QcEngine, Result, load_survey_snapshot};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "snapshot".to_string());
    let dir = Path::new(&dir);
    if !dir.exists() {
        warn!("Snapshot directory not found: {}", dir.display());
        return Ok(());
    }

    info!("Loading survey snapshot from: {}", dir.display());
    let start = Instant::now();
    let snapshot = load_survey_snapshot(dir)?;
    info!(
        "Loaded {} household, {} woman, {} pregnancy rows in {:?}",
        snapshot.household.num_rows(),
        snapshot.women.num_rows(),
        snapshot.pregnancies.num_rows(),
        start.elapsed()
    );

    let engine = QcEngine::default();
    let start = Instant::now();
    let mut report = engine.generate(&snapshot.household, &snapshot.women, &snapshot.pregnancies)?;
    info!("Generated QC report in {:?}", start.elapsed());

    let hcols = HouseholdColumns::resolve(&snapshot.household, engine.config())?;
    let coverage = CoverageSummary::from_household(&snapshot.household, &hcols);
    let summary = QcSummary::from_report(&report);
    info!(
        "Coverage: {} households, {} enumerators, {} wards, {} communities",
        coverage.households_reached,
        coverage.active_enumerators,
        coverage.wards_reached,
        coverage.communities_reached
    );
    info!(
        "Flags: {} dup household, {} dup mother, {} dup child, {} alive, {} later-died, {} miscarriage",
        summary.duplicate_household,
        summary.duplicate_mother,
        summary.duplicate_child,
        summary.alive_count_mismatch,
        summary.later_died_mismatch,
        summary.miscarriage_mismatch
    );

    // Flagged submissions only, worst first, as JSON lines for downstream tools
    report.sort_by_flags();
    for record in report.records.iter().filter(|r| !r.issues.is_empty()) {
        let line = serde_json::json!({
            "submission_uuid": record.submission_uuid,
            "enumerator": record.enumerator,
            "qc_issues": record.issue_string(),
            "total_flags": record.flag_count(),
            "error_percentage": format!("{:.1}", record.error_percentage()),
        });
        println!("{line}");
    }

    Ok(())
}
