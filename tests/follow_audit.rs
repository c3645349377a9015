use anyhow::Result;
use followee::args::Args;
use followee::opener::LinkOpener;
use followee::prompt::Checkpoint;
use followee::run_follow_audit;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    fn new() -> Self {
        Self {
            opened: RefCell::new(Vec::new()),
        }
    }
}

impl LinkOpener for RecordingOpener {
    fn open_link(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

struct RecordingCheckpoint {
    prompts: RefCell<Vec<String>>,
}

impl RecordingCheckpoint {
    fn new() -> Self {
        Self {
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Checkpoint for RecordingCheckpoint {
    fn wait(&self, message: &str) -> Result<()> {
        self.prompts.borrow_mut().push(message.to_string());
        Ok(())
    }
}

fn args_for(input: &Path) -> Args {
    Args {
        input: Some(input.to_path_buf()),
        platform: "instagram".to_string(),
        batch_size: 20,
        yes: true,
        dry_run: false,
        verbose: false,
    }
}

#[test]
fn test_bracketed_export_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("followers.txt");
    fs::write(&input, "['alice', 'bob']\n['bob', 'carol']").unwrap();

    let opener = RecordingOpener::new();
    let checkpoint = RecordingCheckpoint::new();
    let args = args_for(&input);

    let summary = run_follow_audit(&args, &checkpoint, &opener).unwrap();

    assert_eq!(summary.platform, "Instagram");
    assert_eq!(summary.followers, 2);
    assert_eq!(summary.following, 2);
    assert_eq!(summary.not_following_back, 1);
    assert_eq!(summary.links_opened, 1);
    assert_eq!(summary.batches, 1);

    // The raw export is never rewritten; each stage persists a sibling artifact.
    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        "['alice', 'bob']\n['bob', 'carol']"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("followers.normalized.txt")).unwrap(),
        "Followers\nalice\nbob\n\nFollowing\nbob\ncarol\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("followers.notfollowing.txt")).unwrap(),
        "carol\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("followers.links.txt")).unwrap(),
        "https://www.instagram.com/carol/\n"
    );

    assert_eq!(
        *opener.opened.borrow(),
        vec!["https://www.instagram.com/carol/".to_string()]
    );

    let prompts = checkpoint.prompts.borrow();
    assert_eq!(
        *prompts,
        vec![
            "Press Enter to continue to Stage 2 (Comparing)...".to_string(),
            "Press Enter to continue to Stage 3 (Finalising)...".to_string(),
            "Press Enter to continue to Stage 4 (Open Links)...".to_string(),
        ]
    );
}

#[test]
fn test_legacy_export_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.txt");
    let raw = "Instagram\n\
               Profiles that you choose to see content from\n\
               Followers\n\
               alice\n\
               Jun 3, 2024\n\
               bob\n\
               Following\n\
               alice\n\
               Jan 15, 2024\n\
               bob\n\
               carol\n\
               Dec 1, 2023\n";
    fs::write(&input, raw).unwrap();

    let opener = RecordingOpener::new();
    let checkpoint = RecordingCheckpoint::new();
    let args = args_for(&input);

    let summary = run_follow_audit(&args, &checkpoint, &opener).unwrap();

    assert_eq!(summary.followers, 2);
    assert_eq!(summary.following, 3);
    assert_eq!(summary.not_following_back, 1);

    // Both export formats funnel into the same canonical layout.
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("export.normalized.txt")).unwrap(),
        "Followers\nalice\nbob\n\nFollowing\nalice\nbob\ncarol\n"
    );
    assert_eq!(
        *opener.opened.borrow(),
        vec!["https://www.instagram.com/carol/".to_string()]
    );
}

#[test]
fn test_batches_pause_only_between_batches() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.txt");
    fs::write(&input, "[]\n['a', 'b', 'c', 'd', 'e']").unwrap();

    let opener = RecordingOpener::new();
    let checkpoint = RecordingCheckpoint::new();
    let mut args = args_for(&input);
    args.batch_size = 2;

    let summary = run_follow_audit(&args, &checkpoint, &opener).unwrap();

    assert_eq!(summary.links_opened, 5);
    assert_eq!(summary.batches, 3);
    assert_eq!(opener.opened.borrow().len(), 5);

    // Three stage pauses, then one pause before each batch after the first.
    let prompts = checkpoint.prompts.borrow();
    assert_eq!(prompts.len(), 5);
    assert_eq!(
        prompts
            .iter()
            .filter(|p| *p == "Press Enter to open the next batch...")
            .count(),
        2
    );
}

#[test]
fn test_rerun_reuses_input_and_overwrites_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.txt");
    fs::write(&input, "['alice']\n['alice', 'bob']").unwrap();

    let args = args_for(&input);
    let first = run_follow_audit(&args, &RecordingCheckpoint::new(), &RecordingOpener::new()).unwrap();
    let second = run_follow_audit(&args, &RecordingCheckpoint::new(), &RecordingOpener::new()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("export.notfollowing.txt")).unwrap(),
        "bob\n"
    );
}

#[test]
fn test_x_platform_uses_x_profile_links() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.txt");
    fs::write(&input, "['alice']\n['alice', 'bob']").unwrap();

    let opener = RecordingOpener::new();
    let mut args = args_for(&input);
    args.platform = "x".to_string();

    let summary = run_follow_audit(&args, &RecordingCheckpoint::new(), &opener).unwrap();

    assert_eq!(summary.platform, "X");
    assert_eq!(*opener.opened.borrow(), vec!["https://x.com/bob/".to_string()]);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("export.links.txt")).unwrap(),
        "https://x.com/bob/\n"
    );
}
