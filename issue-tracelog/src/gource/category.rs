//! Label-derived issue categories.

/// Directory an issue is filed under in the virtual tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    Bugs,
    Features,
    Docs,
    General,
}

impl IssueCategory {
    /// Picks the category from label names.
    ///
    /// Matching is a case-insensitive substring test with priority
    /// bug > feature/enhancement > doc.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Self {
        let lowered: Vec<String> = labels.iter().map(|label| label.to_lowercase()).collect();
        let any = |needles: &[&str]| {
            lowered
                .iter()
                .any(|label| needles.iter().any(|needle| label.contains(needle)))
        };

        if any(&["bug"]) {
            Self::Bugs
        } else if any(&["feature", "enhancement"]) {
            Self::Features
        } else if any(&["doc"]) {
            Self::Docs
        } else {
            Self::General
        }
    }

    /// Directory name in the virtual tree.
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Bugs => "bugs",
            Self::Features => "features",
            Self::Docs => "docs",
            Self::General => "general",
        }
    }

    /// Virtual path of an issue in this category.
    #[must_use]
    pub fn issue_path(&self, issue_id: u64) -> String {
        format!("/issues/{}/issue_{issue_id}.issue", self.dir_name())
    }
}
