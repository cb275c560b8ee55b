//! Command-line surface.

use crate::logger::level_for_verbosity;

use tasktracker_core::DEFAULT_TIMEOUT_SECS;
use tasktracker_core::config::SettingsOverrides;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "tasktracker", bin_name = "tasktracker", version)]
#[command(about = "Command-line client for the TaskTracker REST API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TaskTracker base URL (fallback: erp_base_url in the environment or .env)
    #[arg(long = "erp-base-url", global = true, value_name = "URL")]
    pub erp_base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings supplied on the command line.
    pub fn overrides(&self) -> SettingsOverrides {
        let project_id = match &self.command {
            Command::CreateTask(args) => args.project_id,
            _ => None,
        };

        SettingsOverrides {
            base_url: self.erp_base_url.clone(),
            project_id,
            timeout_secs: Some(self.timeout),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        level_for_verbosity(self.verbose)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a task in a project
    CreateTask(CreateTaskArgs),

    /// Show a task or an epic
    Get(EntityArgs),

    /// List the comments of a task or an epic
    Comments(EntityArgs),

    /// Post a comment, or a reply with --parent-id
    Comment(CommentArgs),

    /// Replace the labels of a task
    ChangeLabels(ChangeLabelsArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateTask(_) => "create-task",
            Command::Get(_) => "get",
            Command::Comments(_) => "comments",
            Command::Comment(_) => "comment",
            Command::ChangeLabels(_) => "change-labels",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateTaskArgs {
    /// Task title
    #[arg(long)]
    pub title: String,

    /// Task description
    #[arg(long)]
    pub description: String,

    /// Project ID (fallback: erp_tasktracker_project_id)
    #[arg(long = "project-id", value_name = "ID")]
    pub project_id: Option<u64>,

    #[arg(long = "epic-id", value_name = "ID")]
    pub epic_id: Option<u64>,

    /// Comma-separated label IDs, e.g. 6,73
    #[arg(long = "label-ids", value_name = "IDS")]
    pub label_ids: Option<String>,

    #[arg(long)]
    pub weight: Option<i64>,

    #[arg(long = "sprint-id", value_name = "ID")]
    pub sprint_id: Option<u64>,

    #[arg(long = "milestone-id", value_name = "ID")]
    pub milestone_id: Option<u64>,
}

/// Exactly one way of addressing a task or an epic.
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct EntityArgs {
    /// Task or epic URL, e.g. <base>/tasktracker/projects/1/tasks/555
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long = "task-id", value_name = "ID")]
    pub task_id: Option<String>,

    #[arg(long = "epic-id", value_name = "ID")]
    pub epic_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CommentArgs {
    #[command(flatten)]
    pub target: EntityArgs,

    /// Parent comment ID; omit for a top-level comment
    #[arg(long = "parent-id", value_name = "ID")]
    pub parent_id: Option<String>,

    /// Comment text
    #[arg(long)]
    pub text: Option<String>,

    /// Path to a UTF-8 file with the comment text
    #[arg(long = "text-file", value_name = "PATH")]
    pub text_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ChangeLabelsArgs {
    #[arg(long = "task-id", value_name = "ID")]
    pub task_id: String,

    /// Comma-separated label IDs; an empty string clears all labels
    #[arg(long = "label-ids", value_name = "IDS", default_value = "")]
    pub label_ids: String,
}
