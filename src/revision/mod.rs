use chrono::NaiveDate;
use crate::attempts::Attempt;
use crate::catalog::{find_by_fuzzy_title, Catalog};

/// A solved problem resurfaces exactly this many days after it was solved.
/// A revision missed on that day is not offered later.
pub const REVISION_INTERVAL_DAYS: i64 = 7;

/// Return the first completed attempt solved exactly REVISION_INTERVAL_DAYS
/// before `today`, scanning in the order given.
///
/// Attempts with an unparseable date are skipped. When the returned attempt
/// has no stored link, title and link are backfilled from the catalog on the
/// returned copy only; the history itself is untouched.
pub fn check_revision_needed(attempts: &[Attempt], catalog: &Catalog, today: NaiveDate) -> Option<Attempt> {
    for attempt in attempts {
        if !attempt.completed.is_completed() {
            continue;
        }

        let solved_on = match attempt.attempted_on() {
            Some(date) => date,
            None => {
                tracing::debug!(
                    title = %attempt.title,
                    date = %attempt.date_attempted,
                    "Skipping attempt with malformed date"
                );
                continue;
            }
        };

        if (today - solved_on).num_days() != REVISION_INTERVAL_DAYS {
            continue;
        }

        let mut due = attempt.clone();
        if due.link().is_none() {
            let found = find_by_fuzzy_title(&due.title, catalog);
            due.title = found.canonical_title;
            due.link = Some(found.link);
        }

        tracing::info!(title = %due.title, solved_on = %solved_on, "Revision due");
        return Some(due);
    }

    None
}
