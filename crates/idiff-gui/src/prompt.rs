//! Asking for more files when the command line names fewer than two.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{debug, info};

use idiff_core::consts::MIN_IMAGE_COUNT;

/// How many more files are needed when `have` were given.
pub fn missing_count(have: usize) -> usize {
    MIN_IMAGE_COUNT.saturating_sub(have)
}

#[derive(Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Ready(Vec<PathBuf>),
    /// The user chose to quit.
    Cancelled,
}

impl PromptOutcome {
    /// Process exit status, or `None` when startup should continue.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            PromptOutcome::Ready(_) => None,
            PromptOutcome::Cancelled => Some(0),
        }
    }
}

/// The dialogs used while prompting.
pub trait FilePrompt {
    /// Let the user pick up to `count` files. Empty when nothing was chosen.
    fn pick(&mut self, count: usize) -> Vec<PathBuf>;

    /// Ask whether to quit after an empty selection.
    fn confirm_quit(&mut self) -> bool;
}

/// Prompt until enough files are chosen or the user agrees to quit.
///
/// Each dialog asks only for the files still missing.
pub fn complete_files(mut files: Vec<PathBuf>, prompt: &mut impl FilePrompt) -> PromptOutcome {
    loop {
        let missing = missing_count(files.len());
        if missing == 0 {
            return PromptOutcome::Ready(files);
        }

        info!(missing, "Prompting for more files");
        let selected = prompt.pick(missing);
        if selected.is_empty() {
            if prompt.confirm_quit() {
                return PromptOutcome::Cancelled;
            }
            continue;
        }
        debug!(?selected, "Files selected");
        files.extend(selected);
    }
}

/// Native file and message dialogs.
pub struct DialogPrompt;

impl FilePrompt for DialogPrompt {
    fn pick(&mut self, count: usize) -> Vec<PathBuf> {
        let dialog = FileDialog::new().set_title(format!("Select {count} image(s) to compare"));
        if count == 1 {
            dialog.pick_file().into_iter().collect()
        } else {
            dialog.pick_files().unwrap_or_default()
        }
    }

    fn confirm_quit(&mut self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Did you want to quit?")
            .set_description("You did not select any files.\n\nDid you want to quit?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        // Anything but an explicit "No" quits.
        answer != MessageDialogResult::No
    }
}

/// Modal error shown when an input cannot be decoded.
pub fn show_load_error(name: &str, info: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Image not recognized")
        .set_description(format!("Image \"{name}\" not recognized.\n\n{info}"))
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays canned dialog answers.
    #[derive(Default)]
    struct Scripted {
        picks: VecDeque<Vec<PathBuf>>,
        quits: VecDeque<bool>,
        requested: Vec<usize>,
    }

    impl FilePrompt for Scripted {
        fn pick(&mut self, count: usize) -> Vec<PathBuf> {
            self.requested.push(count);
            self.picks.pop_front().unwrap_or_default()
        }

        fn confirm_quit(&mut self) -> bool {
            self.quits.pop_front().unwrap_or(true)
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_missing_count() {
        assert_eq!(missing_count(0), 2);
        assert_eq!(missing_count(1), 1);
        assert_eq!(missing_count(2), 0);
        assert_eq!(missing_count(5), 0);
    }

    #[test]
    fn test_enough_files_skip_prompting() {
        let mut prompt = Scripted::default();
        let outcome = complete_files(paths(&["a", "b"]), &mut prompt);
        assert_eq!(outcome, PromptOutcome::Ready(paths(&["a", "b"])));
        assert!(prompt.requested.is_empty());
    }

    #[test]
    fn test_one_file_then_cancel_exits_zero() {
        let mut prompt = Scripted::default();
        let outcome = complete_files(paths(&["a"]), &mut prompt);
        assert_eq!(prompt.requested, vec![1]);
        assert_eq!(outcome, PromptOutcome::Cancelled);
        assert_eq!(outcome.exit_code(), Some(0));
    }

    #[test]
    fn test_declining_to_quit_prompts_again() {
        let mut prompt = Scripted {
            picks: VecDeque::from([Vec::new(), paths(&["b"])]),
            quits: VecDeque::from([false]),
            ..Scripted::default()
        };
        let outcome = complete_files(paths(&["a"]), &mut prompt);
        assert_eq!(outcome, PromptOutcome::Ready(paths(&["a", "b"])));
        assert_eq!(outcome.exit_code(), None);
        assert_eq!(prompt.requested, vec![1, 1]);
    }

    #[test]
    fn test_partial_selection_prompts_for_the_rest() {
        let mut prompt = Scripted {
            picks: VecDeque::from([paths(&["a"]), paths(&["b"])]),
            ..Scripted::default()
        };
        let outcome = complete_files(Vec::new(), &mut prompt);
        assert_eq!(prompt.requested, vec![2, 1]);
        assert_eq!(outcome, PromptOutcome::Ready(paths(&["a", "b"])));
        assert_eq!(outcome.exit_code(), None);
    }

    #[test]
    fn test_quitting_after_a_partial_selection_exits_zero() {
        let mut prompt = Scripted {
            picks: VecDeque::from([paths(&["a"])]),
            ..Scripted::default()
        };
        let outcome = complete_files(Vec::new(), &mut prompt);
        assert_eq!(prompt.requested, vec![2, 1]);
        assert_eq!(outcome, PromptOutcome::Cancelled);
    }
}
