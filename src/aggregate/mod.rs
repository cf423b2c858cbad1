//! Per-submission aggregation of detail rows.
//!
//! Two passes, both keyed by the submission identifier: summing the five
//! self-reported counts across a submission's woman rows, and tallying
//! derived outcome counts across its pregnancy-event rows. The merge at the
//! end has full outer-join semantics so a submission present on only one
//! side still appears, zero-filled, in the comparison table.

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::config::QcConfig;
use crate::model::{BirthOutcome, Survival};
use crate::schema::{PregnancyColumns, WomanColumns};
use crate::utils::{count_at, string_at};

/// Per-submission sums of the self-reported woman-level counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WomanAggregate {
    /// Sum of children-currently-alive counts
    pub children_alive: i64,
    /// Sum of children-who-died counts
    pub children_dead: i64,
    /// Sum of miscarriage/abortion counts
    pub miscarriages: i64,
    /// Sum of sons-who-died counts
    pub sons_dead: i64,
    /// Sum of daughters-who-died counts
    pub daughters_dead: i64,
}

impl WomanAggregate {
    /// Derived total of children who died (sons + daughters)
    #[must_use]
    pub fn total_children_died(&self) -> i64 {
        self.sons_dead + self.daughters_dead
    }
}

/// Per-submission derived counts over pregnancy-event rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PregnancyTally {
    /// Rows with outcome born-alive AND still-alive yes
    pub born_alive_and_alive: i64,
    /// Rows with still-alive no, regardless of birth outcome
    pub later_died: i64,
    /// Rows with outcome miscarriage-or-abortion or born-dead
    pub miscarriage_or_stillbirth: i64,
    /// Rows with outcome born-dead (diagnostic only, not compared)
    pub born_dead_raw: i64,
}

/// Keyed aggregation result preserving first-seen submission order
#[derive(Debug, Clone, Default)]
pub struct Aggregated<T> {
    /// Submission identifiers in first-seen order
    pub order: Vec<String>,
    /// Aggregate per submission identifier
    pub map: FxHashMap<String, T>,
}

impl<T: Default> Aggregated<T> {
    fn entry(&mut self, uuid: &str) -> &mut T {
        if !self.map.contains_key(uuid) {
            self.order.push(uuid.to_string());
            self.map.insert(uuid.to_string(), T::default());
        }
        self.map.get_mut(uuid).expect("entry just inserted")
    }
}

/// One row of the merged comparison table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedAggregate {
    /// Submission identifier
    pub submission_uuid: String,
    /// Woman-level sums (zero-filled when the submission has no woman rows)
    pub woman: WomanAggregate,
    /// Pregnancy tallies (zero-filled when the submission has no pregnancy rows)
    pub tally: PregnancyTally,
}

fn column<'a>(batch: &'a RecordBatch, name: Option<&str>) -> Option<&'a ArrayRef> {
    name.and_then(|n| batch.column_by_name(n))
}

/// Sum the five self-reported counts across each submission's woman rows
///
/// Columns that never resolved sum as zero; non-numeric cells coerce to
/// zero. Rows whose submission id is null are skipped (they cannot join).
#[must_use]
pub fn aggregate_women(batch: &RecordBatch, cols: &WomanColumns) -> Aggregated<WomanAggregate> {
    let uuid_col = batch
        .column_by_name(&cols.submission_uuid)
        .expect("submission id column was resolved against this batch");
    let alive = column(batch, cols.children_alive.as_deref());
    let dead = column(batch, cols.children_dead.as_deref());
    let misc = column(batch, cols.miscarriages.as_deref());
    let sons = column(batch, cols.sons_dead.as_deref());
    let daughters = column(batch, cols.daughters_dead.as_deref());

    let mut agg = Aggregated::default();
    for row in 0..batch.num_rows() {
        let Some(uuid) = string_at(uuid_col, row) else {
            continue;
        };
        let entry: &mut WomanAggregate = agg.entry(&uuid);
        entry.children_alive += alive.map_or(0, |a| count_at(a, row));
        entry.children_dead += dead.map_or(0, |a| count_at(a, row));
        entry.miscarriages += misc.map_or(0, |a| count_at(a, row));
        entry.sons_dead += sons.map_or(0, |a| count_at(a, row));
        entry.daughters_dead += daughters.map_or(0, |a| count_at(a, row));
    }
    agg
}

fn outcome_at(array: Option<&ArrayRef>, row: usize, config: &QcConfig) -> BirthOutcome {
    let Some(value) = array.and_then(|a| string_at(a, row)) else {
        return BirthOutcome::Unknown;
    };
    let value = value.trim().to_string();
    if value == config.born_alive_level {
        BirthOutcome::BornAlive
    } else if value == config.born_dead_level {
        BirthOutcome::BornDead
    } else if value == config.miscarriage_level {
        BirthOutcome::MiscarriageOrAbortion
    } else {
        BirthOutcome::Unknown
    }
}

fn survival_at(array: Option<&ArrayRef>, row: usize, config: &QcConfig) -> Survival {
    let Some(value) = array.and_then(|a| string_at(a, row)) else {
        return Survival::Unknown;
    };
    let value = value.trim().to_string();
    if value == config.alive_yes_level {
        Survival::Yes
    } else if value == config.alive_no_level {
        Survival::No
    } else {
        Survival::Unknown
    }
}

/// Tally derived outcome counts across each submission's pregnancy rows
///
/// Unresolved outcome or still-alive columns degrade to all-`Unknown`,
/// which contributes nothing to any tally.
#[must_use]
pub fn tally_pregnancies(
    batch: &RecordBatch,
    cols: &PregnancyColumns,
    config: &QcConfig,
) -> Aggregated<PregnancyTally> {
    let uuid_col = batch
        .column_by_name(&cols.submission_uuid)
        .expect("submission id column was resolved against this batch");
    let outcome_col = column(batch, cols.outcome.as_deref());
    let still_alive_col = column(batch, cols.still_alive.as_deref());

    let mut agg = Aggregated::default();
    for row in 0..batch.num_rows() {
        let Some(uuid) = string_at(uuid_col, row) else {
            continue;
        };
        let outcome = outcome_at(outcome_col, row, config);
        let survival = survival_at(still_alive_col, row, config);

        let entry: &mut PregnancyTally = agg.entry(&uuid);
        if outcome == BirthOutcome::BornAlive && survival == Survival::Yes {
            entry.born_alive_and_alive += 1;
        }
        if survival == Survival::No {
            entry.later_died += 1;
        }
        if matches!(
            outcome,
            BirthOutcome::MiscarriageOrAbortion | BirthOutcome::BornDead
        ) {
            entry.miscarriage_or_stillbirth += 1;
        }
        if outcome == BirthOutcome::BornDead {
            entry.born_dead_raw += 1;
        }
    }
    agg
}

/// Merge the two aggregation passes with full outer-join semantics
///
/// Output order is deterministic: woman-side submissions in first-seen
/// order, then pregnancy-only submissions in first-seen order. A missing
/// side fills with zero, never with "no data".
#[must_use]
pub fn merge_aggregates(
    women: &Aggregated<WomanAggregate>,
    pregnancies: &Aggregated<PregnancyTally>,
) -> Vec<MergedAggregate> {
    let mut merged = Vec::with_capacity(women.order.len());

    for uuid in &women.order {
        merged.push(MergedAggregate {
            submission_uuid: uuid.clone(),
            woman: women.map[uuid],
            tally: pregnancies.map.get(uuid).copied().unwrap_or_default(),
        });
    }
    for uuid in &pregnancies.order {
        if !women.map.contains_key(uuid) {
            merged.push(MergedAggregate {
                submission_uuid: uuid.clone(),
                woman: WomanAggregate::default(),
                tally: pregnancies.map[uuid],
            });
        }
    }
    merged
}
