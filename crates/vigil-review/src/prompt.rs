/// Literal token the model is instructed to return when it finds no issues.
pub const NO_ISSUES_TOKEN: &str = "LGTM";

const SYSTEM_PROMPT: &str = "\
You are a strict senior code reviewer looking at a pull request diff.

Rules:
- Prioritize logic bugs, security flaws, and performance issues
- Do not nitpick formatting, naming, or style
- Be concise; a short list of concrete findings beats prose
- Reference the file and hunk you are commenting on
- If the change has no issues worth raising, respond with exactly: LGTM";

/// Build the system prompt for the review request.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::build_system_prompt;
///
/// let prompt = build_system_prompt();
/// assert!(prompt.contains("senior code reviewer"));
/// assert!(prompt.contains("LGTM"));
/// ```
pub fn build_system_prompt() -> String {
    SYSTEM_PROMPT.to_string()
}

/// Build the user prompt containing the diff to review.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::build_review_prompt;
///
/// let prompt = build_review_prompt("+new line");
/// assert!(prompt.contains("+new line"));
/// ```
pub fn build_review_prompt(diff: &str) -> String {
    format!("Review the following pull request diff:\n\n```diff\n{diff}\n```\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_contains_key_instructions() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("logic bugs"));
        assert!(prompt.contains("security flaws"));
        assert!(prompt.contains("performance"));
        assert!(prompt.contains(NO_ISSUES_TOKEN));
    }

    #[test]
    fn system_prompt_discourages_formatting_nitpicks() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("formatting"));
    }

    #[test]
    fn review_prompt_includes_diff_fence() {
        let prompt = build_review_prompt("+added line");
        assert!(prompt.contains("+added line"));
        assert!(prompt.contains("```diff"));
    }
}
