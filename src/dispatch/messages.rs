//! User-facing texts shown for notifications and drive events.

use std::sync::OnceLock;

use regex::Regex;

use crate::events::{base_name, parent_path, MoveStage};

pub const FS_LOADED_TITLE: &str = "Libraries are ready";
pub const FS_LOADED_BODY: &str = "All libraries are loaded and ready to use.";
pub const DOWNLOAD_TITLE: &str = "Download file";

pub fn synchronized_title(repo_name: &str) -> String {
    format!("\"{repo_name}\" is synchronized")
}

pub fn uploading_title(repo_name: &str) -> String {
    format!("\"{repo_name}\" is being uploaded")
}

/// Repo name first, then the base name of the failing path, then nothing.
pub fn sync_error_title(repo_name: &str, error_path: &str) -> String {
    let subject = if !repo_name.is_empty() {
        repo_name
    } else {
        base_name(error_path)
    };

    if subject.is_empty() {
        "Error when syncing".to_string()
    } else {
        format!("Error when syncing \"{subject}\"")
    }
}

/// Title and body for a cross-library move, e.g. `Starting to move "c.txt"`.
pub fn cross_repo_move(stage: MoveStage, src_path: &str, dst_path: &str) -> (String, String) {
    let src = base_name(src_path);
    let dst = format!("{}/", parent_path(dst_path));

    match stage {
        MoveStage::Start => (
            format!("Starting to move \"{src}\""),
            format!("Starting to move \"{src}\" to \"{dst}\""),
        ),
        MoveStage::Done => (
            format!("Successfully moved \"{src}\""),
            format!("Successfully moved \"{src}\" to \"{dst}\""),
        ),
        MoveStage::Error => (
            format!("Failed to move \"{src}\""),
            format!("Failed to move \"{src}\" to \"{dst}\""),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSummary {
    pub name: String,
    pub count: String,
}

const DELETE_SUMMARY_PATTERN: &str = r#"Deleted "(.+)" and (.+) more files\."#;

fn delete_summary_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(DELETE_SUMMARY_PATTERN).ok())
        .as_ref()
}

/// Pulls the first file name and the remaining count out of the daemon's
/// `Deleted "<name>" and <count> more files.` summary.
pub fn parse_delete_summary(summary: &str) -> Option<DeleteSummary> {
    let captures = delete_summary_pattern()?.captures(summary.trim())?;
    Some(DeleteSummary {
        name: captures.get(1)?.as_str().to_string(),
        count: captures.get(2)?.as_str().to_string(),
    })
}

/// Main text of the deletion prompt; empty when the summary does not match.
pub fn delete_confirmation_text(summary: &str) -> String {
    parse_delete_summary(summary)
        .map(|parsed| format!("Deleted \"{}\" and {} more files.", parsed.name, parsed.count))
        .unwrap_or_default()
}

pub fn delete_confirmation_info(repo_name: &str) -> String {
    format!(
        "Do you want to delete files in library \"{}\" ?",
        repo_name.trim()
    )
}

pub fn delete_repo_text(repo_name: &str) -> String {
    format!("Deleted library \"{}\"", repo_name.trim())
}

pub fn delete_repo_info(repo_name: &str) -> String {
    format!("Confirm to delete library \"{}\" ?", repo_name.trim())
}

pub fn download_started(path: &str) -> String {
    format!("Start to download file \"{}\" ", base_name(path))
}

pub fn download_finished(path: &str) -> String {
    format!("file \"{}\" has been downloaded ", base_name(path))
}

pub fn create_root_file_failed(path: &str) -> (String, String) {
    (
        format!("Failed to create file \"{}\"", base_name(path)),
        "You can't create files in the mount folder directly".to_string(),
    )
}

pub fn remove_repo_refused(path: &str) -> (String, String) {
    (
        "Failed to delete folder".to_string(),
        format!("You can't delete the library \"{}\" directly", base_name(path)),
    )
}

/// Rewrites the daemon's commit description into the wording shown to users.
pub fn translate_commit_desc(desc: &str) -> String {
    desc.trim_end()
        .lines()
        .map(translate_commit_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn translate_commit_line(line: &str) -> String {
    let line = line.trim_end();
    if let Some(rest) = line.strip_prefix("Reverted repo") {
        return format!("Reverted library{rest}");
    }
    if let Some(rest) = line.strip_prefix("Recovered deleted directory") {
        return format!("Restored deleted directory{rest}");
    }
    if line == "Auto merge by seafile system" || line == "Auto merge by system" {
        return "Automatically merged by the system".to_string();
    }
    line.to_string()
}
