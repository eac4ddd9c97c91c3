use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::prediction::JobTitle;

/// Reference salary per job title used as the comparison baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageSalaryTable {
    entries: BTreeMap<JobTitle, u64>,
}

impl AverageSalaryTable {
    pub fn standard() -> Self {
        Self::from_entries([
            (JobTitle::DataScientist, 850_000),
            (JobTitle::WebDeveloper, 600_000),
            (JobTitle::UiUxDesigner, 700_000),
            (JobTitle::DevOpsEngineer, 900_000),
        ])
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (JobTitle, u64)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// `None` when the table has no reference for the title.
    pub fn average_for(&self, job_title: JobTitle) -> Option<u64> {
        self.entries.get(&job_title).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (JobTitle, u64)> + '_ {
        self.entries.iter().map(|(title, salary)| (*title, *salary))
    }
}

/// Process-wide read-only table shared by every session.
pub fn standard_averages() -> &'static AverageSalaryTable {
    static TABLE: OnceLock<AverageSalaryTable> = OnceLock::new();
    TABLE.get_or_init(AverageSalaryTable::standard)
}
