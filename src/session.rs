//! Editable document state for one summarizing session.
//!
//! All display state lives in [`Session`]: the text buffer, its derived word
//! count, the clear confirmation flag, the last summary and the loading flag.
//! Nothing here performs I/O; the remote call and the clipboard are driven by
//! the caller, which hands the results back through [`Session::complete`] and
//! [`Session::copy_summary`].

use crate::clipboard::ClipboardSink;
use crate::llm::SummaryOutcome;

/// Maximum number of words accepted from typed input and allowed to be submitted.
pub const MAX_WORDS: usize = 1000;

/// Count whitespace-delimited, non-empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Result of a typed edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// Edit would exceed [`MAX_WORDS`]; buffer left as it was
    Rejected,
}

/// Result of pressing the clear control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// First press: waiting for the user to confirm
    AwaitingConfirmation,
    Cleared,
}

/// Result of the copy action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// No summary to copy; the clipboard was not touched
    Nothing,
    Copied,
    Failed,
}

/// Proof that a submission is in flight.
///
/// Only [`Session::begin_submit`] hands these out and [`Session::complete`]
/// consumes it, so the loading flag drops back exactly once per submission.
#[derive(Debug)]
#[must_use = "a pending submission must be completed"]
pub struct PendingSubmission {
    text: String,
}

impl PendingSubmission {
    /// The text captured when the submission started
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Default)]
pub struct Session {
    text: String,
    word_count: usize,
    confirm_clear: bool,
    summary: String,
    loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label for the clear control, following the confirmation state
    pub fn clear_label(&self) -> &'static str {
        if self.confirm_clear {
            "Are you sure?"
        } else {
            "Clear"
        }
    }

    /// Apply a typed edit. Input over [`MAX_WORDS`] is dropped and the last
    /// accepted text stays in place.
    pub fn on_text_change(&mut self, input: impl Into<String>) -> EditOutcome {
        let input = input.into();
        let words = count_words(&input);

        if words > MAX_WORDS {
            tracing::debug!(words, "typed input over the word cap, ignored");
            return EditOutcome::Rejected;
        }

        self.text = input;
        self.word_count = words;
        EditOutcome::Accepted
    }

    /// Replace the buffer with text extracted from a file.
    ///
    /// Imported text bypasses the word cap; submission is still gated by it.
    pub fn import(&mut self, text: &str) {
        self.text = text.trim().to_string();
        self.word_count = count_words(&self.text);
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.word_count > 0 && self.word_count <= MAX_WORDS && !self.loading
    }

    /// Start a submission if the current text is submittable and nothing is
    /// in flight. Returns `None` (and changes nothing) otherwise.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_submit() {
            return None;
        }

        self.loading = true;
        Some(PendingSubmission {
            text: self.text.clone(),
        })
    }

    /// Finish a submission, replacing the summary with the outcome's text
    pub fn complete(&mut self, pending: PendingSubmission, outcome: SummaryOutcome) {
        let PendingSubmission { text: _ } = pending;
        self.summary = outcome.into_text();
        self.loading = false;
    }

    /// Two-step clear: the first call arms the confirmation, the second
    /// empties the buffer and disarms it.
    pub fn clear(&mut self) -> ClearOutcome {
        if self.confirm_clear {
            self.text.clear();
            self.word_count = 0;
            self.confirm_clear = false;
            ClearOutcome::Cleared
        } else {
            self.confirm_clear = true;
            ClearOutcome::AwaitingConfirmation
        }
    }

    /// Put the summary on the clipboard, if there is one
    pub fn copy_summary(&self, clipboard: &mut dyn ClipboardSink) -> CopyOutcome {
        if self.summary.is_empty() {
            return CopyOutcome::Nothing;
        }

        match clipboard.set_text(&self.summary) {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                tracing::error!("Failed to copy text: {:#}", e);
                CopyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::huggingface::{ERROR_PLACEHOLDER, NO_SUMMARY_PLACEHOLDER};

    #[derive(Default)]
    struct RecordingClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("no display");
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_count_words_ignores_extra_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words("  hello \n\n world\tagain  "), 3);
    }

    #[test]
    fn test_typed_edit_commits_text_and_count() {
        let mut session = Session::new();
        assert_eq!(session.on_text_change("one  two\nthree "), EditOutcome::Accepted);
        assert_eq!(session.text(), "one  two\nthree ");
        assert_eq!(session.word_count(), 3);
    }

    #[test]
    fn test_typed_edit_at_cap_is_accepted() {
        let mut session = Session::new();
        assert_eq!(session.on_text_change(words(MAX_WORDS)), EditOutcome::Accepted);
        assert_eq!(session.word_count(), MAX_WORDS);
    }

    #[test]
    fn test_typed_edit_over_cap_keeps_previous_state() {
        let mut session = Session::new();
        session.on_text_change("keep me");

        assert_eq!(
            session.on_text_change(words(MAX_WORDS + 1)),
            EditOutcome::Rejected
        );
        assert_eq!(session.text(), "keep me");
        assert_eq!(session.word_count(), 2);
    }

    #[test]
    fn test_import_trims_and_is_not_capped() {
        let mut session = Session::new();
        session.import("  hello world \n");
        assert_eq!(session.text(), "hello world");
        assert_eq!(session.word_count(), 2);

        session.import(&words(MAX_WORDS + 5));
        assert_eq!(session.word_count(), MAX_WORDS + 5);
        assert!(!session.can_submit());
    }

    #[test]
    fn test_submit_requires_words() {
        let mut session = Session::new();
        assert!(!session.can_submit());
        assert!(session.begin_submit().is_none());
        assert!(!session.is_loading());

        session.on_text_change("   ");
        assert!(session.begin_submit().is_none());
    }

    #[test]
    fn test_only_one_submission_in_flight() {
        let mut session = Session::new();
        session.on_text_change("some text to summarize");

        let pending = session.begin_submit().expect("submittable");
        assert_eq!(pending.text(), "some text to summarize");
        assert!(session.is_loading());
        assert!(!session.can_submit());
        assert!(session.begin_submit().is_none());

        session.complete(pending, SummaryOutcome::Succeeded("A short summary.".into()));
        assert!(!session.is_loading());
        assert_eq!(session.summary(), "A short summary.");
        assert!(session.can_submit());
    }

    #[test]
    fn test_new_submission_overwrites_summary() {
        let mut session = Session::new();
        session.on_text_change("text");

        let pending = session.begin_submit().unwrap();
        session.complete(pending, SummaryOutcome::Succeeded("first".into()));

        let pending = session.begin_submit().unwrap();
        session.complete(pending, SummaryOutcome::Malformed);
        assert_eq!(session.summary(), NO_SUMMARY_PLACEHOLDER);

        let pending = session.begin_submit().unwrap();
        session.complete(pending, SummaryOutcome::Failed);
        assert_eq!(session.summary(), ERROR_PLACEHOLDER);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_clear_needs_two_presses() {
        let mut session = Session::new();
        session.on_text_change("something to lose");
        assert_eq!(session.clear_label(), "Clear");

        assert_eq!(session.clear(), ClearOutcome::AwaitingConfirmation);
        assert_eq!(session.text(), "something to lose");
        assert_eq!(session.clear_label(), "Are you sure?");

        assert_eq!(session.clear(), ClearOutcome::Cleared);
        assert_eq!(session.text(), "");
        assert_eq!(session.word_count(), 0);
        assert_eq!(session.clear_label(), "Clear");
    }

    #[test]
    fn test_clear_confirmation_survives_edits() {
        let mut session = Session::new();
        session.clear();
        session.on_text_change("typed after arming");
        assert_eq!(session.clear_label(), "Are you sure?");

        assert_eq!(session.clear(), ClearOutcome::Cleared);
        assert_eq!(session.text(), "");
    }

    #[test]
    fn test_clear_keeps_summary() {
        let mut session = Session::new();
        session.on_text_change("text");
        let pending = session.begin_submit().unwrap();
        session.complete(pending, SummaryOutcome::Succeeded("kept".into()));

        session.clear();
        session.clear();
        assert_eq!(session.summary(), "kept");
    }

    #[test]
    fn test_copy_without_summary_leaves_clipboard_alone() {
        let session = Session::new();
        let mut clipboard = RecordingClipboard::default();
        assert_eq!(session.copy_summary(&mut clipboard), CopyOutcome::Nothing);
        assert!(clipboard.contents.is_none());
    }

    #[test]
    fn test_copy_summary() {
        let mut session = Session::new();
        session.on_text_change("text");
        let pending = session.begin_submit().unwrap();
        session.complete(pending, SummaryOutcome::Succeeded("copy me".into()));

        let mut clipboard = RecordingClipboard::default();
        assert_eq!(session.copy_summary(&mut clipboard), CopyOutcome::Copied);
        assert_eq!(clipboard.contents.as_deref(), Some("copy me"));

        let mut broken = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        assert_eq!(session.copy_summary(&mut broken), CopyOutcome::Failed);
    }
}
