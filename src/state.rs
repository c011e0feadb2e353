//! Console State
//!
//! Pure, headless-testable client state: the known jobs, the annotator
//! registry snapshot, and the transforms the rendering layer consumes.

use crate::models::{AnnotatorInfo, Job};
use std::collections::HashMap;

/// In-memory client state, owned by the TUI controller and mutated only from
/// the UI loop.
#[derive(Debug, Default)]
pub struct ConsoleState {
    /// Known jobs, kept sorted descending by submission time.
    pub jobs: Vec<Job>,
    /// Annotator registry snapshot, keyed by name. Replaced wholesale on
    /// each fetch.
    pub annotators: HashMap<String, AnnotatorInfo>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job and restore the descending-by-submission-time order.
    pub fn insert_job(&mut self, job: Job) {
        self.jobs.push(job);
        self.jobs
            .sort_by(|a, b| b.submission_time.cmp(&a.submission_time));
    }

    /// Merge a fetched job list into the collection.
    pub fn merge_jobs(&mut self, jobs: Vec<Job>) {
        for job in jobs {
            self.insert_job(job);
        }
    }

    /// Replace the annotator snapshot.
    pub fn replace_annotators(&mut self, annotators: HashMap<String, AnnotatorInfo>) {
        self.annotators = annotators;
    }
}

/// One checkbox row in the annotator selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorChoice {
    pub name: String,
    pub title: String,
    pub checked: bool,
}

/// Build selector rows from an annotator snapshot: one row per entry, sorted
/// case-insensitively by title ascending (stable), all checked by default.
pub fn build_choices(annotators: &HashMap<String, AnnotatorInfo>) -> Vec<AnnotatorChoice> {
    let mut infos: Vec<&AnnotatorInfo> = annotators.values().collect();
    infos.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    infos
        .into_iter()
        .map(|info| AnnotatorChoice {
            name: info.name.clone(),
            title: info.title.clone(),
            checked: true,
        })
        .collect()
}

/// Names of the checked rows, in display order.
pub fn checked_names(choices: &[AnnotatorChoice]) -> Vec<String> {
    choices
        .iter()
        .filter(|choice| choice.checked)
        .map(|choice| choice.name.clone())
        .collect()
}

/// Set every row's checked state uniformly (select-all / select-none).
pub fn set_all_checked(choices: &mut [AnnotatorChoice], checked: bool) {
    for choice in choices {
        choice.checked = checked;
    }
}

/// Uniform label width for the selector: the maximum title width among all
/// rows. Purely cosmetic.
pub fn label_width(choices: &[AnnotatorChoice]) -> usize {
    choices
        .iter()
        .map(|choice| choice.title.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn job(id: &str, hour: u32) -> Job {
        Job {
            id: id.to_string(),
            orig_input_fname: format!("{id}.vcf"),
            submission_time: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            viewable: false,
        }
    }

    fn annotators(titles: &[(&str, &str)]) -> HashMap<String, AnnotatorInfo> {
        titles
            .iter()
            .map(|(name, title)| {
                (
                    name.to_string(),
                    AnnotatorInfo {
                        name: name.to_string(),
                        title: title.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn jobs_stay_sorted_descending_after_insertion() {
        // T1 < T2 < T3 inserted out of order
        let mut state = ConsoleState::new();
        state.insert_job(job("t2", 12));
        state.insert_job(job("t3", 18));
        state.insert_job(job("t1", 6));

        let ids: Vec<&str> = state.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn merge_keeps_descending_order() {
        let mut state = ConsoleState::new();
        state.insert_job(job("t2", 12));
        state.merge_jobs(vec![job("t1", 6), job("t3", 18)]);

        let ids: Vec<&str> = state.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn choices_sort_case_insensitively_by_title() {
        let snapshot = annotators(&[("z", "Zeta"), ("a", "alpha"), ("b", "Beta")]);
        let choices = build_choices(&snapshot);
        let titles: Vec<&str> = choices.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Beta", "Zeta"]);
        assert!(choices.iter().all(|c| c.checked));
    }

    #[test]
    fn choices_match_snapshot_one_to_one() {
        let snapshot = annotators(&[("clinvar", "ClinVar"), ("gnomad", "gnomAD")]);
        let choices = build_choices(&snapshot);
        assert_eq!(choices.len(), snapshot.len());
        for choice in &choices {
            assert!(snapshot.contains_key(&choice.name));
        }
    }

    #[test]
    fn checked_names_follow_display_order() {
        let snapshot = annotators(&[("z", "Zeta"), ("a", "alpha"), ("b", "Beta")]);
        let mut choices = build_choices(&snapshot);
        choices[1].checked = false; // Beta
        assert_eq!(checked_names(&choices), vec!["a", "z"]);
    }

    #[test]
    fn select_all_then_none_leaves_zero_checked() {
        let snapshot = annotators(&[("z", "Zeta"), ("a", "alpha"), ("b", "Beta")]);
        let mut choices = build_choices(&snapshot);
        choices[0].checked = false;

        set_all_checked(&mut choices, true);
        assert!(choices.iter().all(|c| c.checked));

        set_all_checked(&mut choices, false);
        assert_eq!(checked_names(&choices).len(), 0);
    }

    #[test]
    fn label_width_is_max_title_width() {
        let snapshot = annotators(&[("a", "VEP"), ("b", "ClinVar Significance")]);
        let choices = build_choices(&snapshot);
        assert_eq!(label_width(&choices), "ClinVar Significance".chars().count());
        assert_eq!(label_width(&[]), 0);
    }
}
