//! Timeline event classification.

use crate::github::TimelineEvent;
use crate::model::{PullRequestSummary, ResolutionMethod};

/// A timeline event that links an issue to code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// The issue was closed by a commit.
    ClosedByCommit { sha: String },

    /// A pull request mentioned the issue.
    CrossReferencedPr {
        summary: PullRequestSummary,
        /// API URL of the pull request, used to list its files and commits.
        api_url: String,
    },

    /// A commit mentioned the issue.
    ReferencedCommit { sha: String },
}

impl LinkEvent {
    /// Resolution method after this event, given the method so far.
    ///
    /// The last matching event wins: a later cross-reference replaces an
    /// earlier direct commit and vice versa. A referencing commit only
    /// classifies an issue that has no classification yet.
    #[must_use]
    pub fn resolve(&self, current: ResolutionMethod) -> ResolutionMethod {
        match self {
            Self::ClosedByCommit { .. } => ResolutionMethod::DirectCommit,
            Self::CrossReferencedPr { .. } => ResolutionMethod::PrLinked,
            Self::ReferencedCommit { .. } => match current {
                ResolutionMethod::Manual => ResolutionMethod::DirectCommit,
                other => other,
            },
        }
    }
}

/// Classifies a timeline event, returning `None` for events that carry no
/// link to code.
#[must_use]
pub fn classify(event: &TimelineEvent) -> Option<LinkEvent> {
    match event.event.as_str() {
        "closed" => commit_sha(event).map(|sha| LinkEvent::ClosedByCommit { sha }),
        "cross-referenced" => {
            let source = event.source.as_ref()?;
            if source.kind != "issue" {
                return None;
            }
            let issue = source.issue.as_ref()?;
            let api_url = issue.pull_request.as_ref()?.url.clone()?;
            Some(LinkEvent::CrossReferencedPr {
                summary: PullRequestSummary {
                    number: issue.number,
                    title: issue.title.clone(),
                    url: issue.html_url.clone(),
                    state: issue.state.clone(),
                },
                api_url,
            })
        }
        "referenced" => commit_sha(event).map(|sha| LinkEvent::ReferencedCommit { sha }),
        _ => None,
    }
}

fn commit_sha(event: &TimelineEvent) -> Option<String> {
    event
        .commit_id
        .as_deref()
        .filter(|sha| !sha.is_empty())
        .map(str::to_string)
}
