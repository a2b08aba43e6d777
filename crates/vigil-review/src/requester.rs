use std::fmt;

use crate::llm::{ChatMessage, LlmClient, Role};
use crate::prompt;

/// Message printed when there is no diff to review.
pub const NO_CHANGES_MESSAGE: &str = "No changes detected.";

/// Message printed when the diff exceeds the size limit. A hard cutoff: the
/// whole diff is rejected, never partially sent.
pub const OVERSIZE_MESSAGE: &str =
    "Diff is too large to review. Please split this change into smaller pull requests.";

/// Prefix for review results produced from an upstream failure.
pub const ERROR_PREFIX: &str = "Review request failed: ";

/// Terminal outcome of a review request.
///
/// Exactly one of these is produced per run, and each renders as a
/// human-readable string. Failures are outcomes, not process errors: the
/// caller prints them and exits normally.
///
/// # Examples
///
/// ```
/// use vigil_review::ReviewOutcome;
///
/// let outcome = ReviewOutcome::NoChanges;
/// assert_eq!(outcome.to_string(), "No changes detected.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The diff was absent or empty; no request was made.
    NoChanges,
    /// The diff exceeded the size limit; no request was made.
    Oversize,
    /// The model's free-text review, verbatim.
    Review(String),
    /// An upstream transport, auth, or parsing failure description.
    Failed(String),
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewOutcome::NoChanges => f.write_str(NO_CHANGES_MESSAGE),
            ReviewOutcome::Oversize => f.write_str(OVERSIZE_MESSAGE),
            ReviewOutcome::Review(text) => f.write_str(text),
            ReviewOutcome::Failed(reason) => write!(f, "{ERROR_PREFIX}{reason}"),
        }
    }
}

/// Turns a collected diff into a [`ReviewOutcome`].
///
/// Strict linear request/response: size checks happen locally, then at most
/// one chat completion request is sent.
pub struct ReviewRequester {
    llm: LlmClient,
    max_diff_chars: usize,
}

impl ReviewRequester {
    /// Create a requester with the given client and size limit.
    pub fn new(llm: LlmClient, max_diff_chars: usize) -> Self {
        Self {
            llm,
            max_diff_chars,
        }
    }

    /// Request a review for `diff`.
    ///
    /// An absent or whitespace-only diff and an oversize diff are resolved
    /// locally without contacting the endpoint. Otherwise a single
    /// non-streaming request is sent; any failure is converted into
    /// [`ReviewOutcome::Failed`] rather than propagated.
    pub async fn request(&self, diff: Option<&str>) -> ReviewOutcome {
        let Some(diff) = diff else {
            return ReviewOutcome::NoChanges;
        };
        if diff.trim().is_empty() {
            return ReviewOutcome::NoChanges;
        }
        if diff.chars().count() > self.max_diff_chars {
            return ReviewOutcome::Oversize;
        }

        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: prompt::build_system_prompt(),
            },
            ChatMessage {
                role: Role::User,
                content: prompt::build_review_prompt(diff),
            },
        ];

        match self.llm.chat(messages).await {
            Ok(content) => ReviewOutcome::Review(content),
            Err(e) => ReviewOutcome::Failed(e.to_string()),
        }
    }
}
