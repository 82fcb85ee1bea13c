use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::controller::{Board, ControllerError};
use crate::model::{TaskId, TaskStatus};
use crate::remote::TaskApi;
use crate::view::{EditForm, Filter, Notice};

#[derive(Parser)]
#[command(name = "taskboard", version = env!("FULL_VERSION"), about = "Personal task board")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Signed in user, overrides the configured session
    #[arg(long, env = "TASKBOARD_USER")]
    pub user: Option<String>,

    /// Base url of the task store, overrides the configured one
    #[arg(long, env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the board, most recent date first
    List {
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Only tasks more than two days past their date
        #[arg(long)]
        overdue: bool,
    },
    /// Add a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "normal")]
        status: TaskStatus,
    },
    /// Change fields of a task, the others keep their value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD, empty to clear
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Done,
    Failed,
    SignInRequired,
}

/// Opens the board and runs one command against it, writing the board and
/// notices to `out`.
pub async fn run<A, W>(
    command: Commands,
    board: &mut Board<A>,
    signin_url: &str,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<RunOutcome>
where
    A: TaskApi,
    W: Write,
{
    match board.open().await {
        Ok(None) => {}
        Ok(Some(notice)) => {
            writeln!(out, "{}", notice)?;
            return Ok(RunOutcome::Failed);
        }
        Err(ControllerError::SignInRequired) => {
            writeln!(out, "Sign in required: {}", signin_url)?;
            return Ok(RunOutcome::SignInRequired);
        }
        Err(err) => return Err(err.into()),
    }

    let notice = match command {
        Commands::List { status, overdue } => {
            let filter = Filter {
                status,
                overdue_only: overdue,
            };
            let items = board.items(today, &filter);
            if items.is_empty() {
                writeln!(out, "No tasks.")?;
            }
            for item in items {
                writeln!(out, "{}", item)?;
            }
            None
        }
        Commands::Add {
            title,
            description,
            date,
            status,
        } => {
            let mut form = EditForm::create();
            form.set_title(title);
            form.set_description(description);
            form.set_status(status);
            if let Some(date) = date {
                form.set_date(&date)?;
            }
            board.submit(&mut form).await?
        }
        Commands::Edit {
            id,
            title,
            description,
            date,
            status,
        } => {
            let id = TaskId::from(id);
            let task = match board.store().get(&id) {
                Some(task) => task,
                None => {
                    writeln!(out, "{}", Notice::error(format!("Task {} not found", id)))?;
                    return Ok(RunOutcome::Failed);
                }
            };
            let mut form = EditForm::edit(task);
            if let Some(title) = title {
                form.set_title(title);
            }
            if let Some(description) = description {
                form.set_description(description);
            }
            if let Some(date) = date {
                form.set_date(&date)?;
            }
            if let Some(status) = status {
                form.set_status(status);
            }
            board.submit(&mut form).await?
        }
        Commands::Delete { id } => board.delete(&TaskId::from(id)).await?,
    };

    match notice {
        Some(notice) => {
            writeln!(out, "{}", notice)?;
            if notice.is_error() {
                return Ok(RunOutcome::Failed);
            }
            Ok(RunOutcome::Done)
        }
        None => Ok(RunOutcome::Done),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{TaskDraft, UserId};
    use crate::remote::MemoryTaskApi;
    use crate::session::{Session, SessionGate, StaticSession};
    use crate::store::TaskListStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    async fn api_with_tasks() -> Arc<MemoryTaskApi> {
        let api = Arc::new(MemoryTaskApi::new());
        let user = UserId::from("u-1");
        api.create(
            &TaskDraft::new("late one").with_date(NaiveDate::from_ymd_opt(2024, 5, 1)),
            &user,
        )
        .await
        .unwrap();
        api.create(
            &TaskDraft::new("fresh one")
                .with_date(NaiveDate::from_ymd_opt(2024, 5, 9))
                .with_status(TaskStatus::Important),
            &user,
        )
        .await
        .unwrap();
        api
    }

    async fn run_with(
        api: Arc<MemoryTaskApi>,
        user: Option<&str>,
        command: Commands,
    ) -> (RunOutcome, String) {
        let session = user.map(|id| Session::new(UserId::from(id)));
        let mut board = Board::new(
            SessionGate::authenticate(StaticSession::new(session)),
            TaskListStore::new(api),
        );
        let mut out = Vec::new();
        let outcome = run(command, &mut board, "http://signin", today(), &mut out)
            .await
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn list_all() -> Commands {
        Commands::List {
            status: None,
            overdue: false,
        }
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from([
            "taskboard", "--user", "u-1", "add", "--title", "pay rent", "--date", "2024-06-01",
            "--status", "important",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("u-1"));
        assert_eq!(
            cli.command,
            Commands::Add {
                title: "pay rent".to_string(),
                description: String::new(),
                date: Some("2024-06-01".to_string()),
                status: TaskStatus::Important,
            }
        );

        assert!(Cli::try_parse_from(["taskboard", "list", "--status", "urgent"]).is_err());
    }

    #[tokio::test]
    async fn test_list() {
        let (outcome, out) = run_with(api_with_tasks().await, Some("u-1"), list_all()).await;

        assert_eq!(outcome, RunOutcome::Done);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 2024-05-09 Important"), "got {:?}", lines[0]);
        assert!(lines[1].starts_with("!2024-05-01 Normal"), "got {:?}", lines[1]);
    }

    #[tokio::test]
    async fn test_list_overdue_only() {
        let command = Commands::List {
            status: None,
            overdue: true,
        };
        let (_, out) = run_with(api_with_tasks().await, Some("u-1"), command).await;

        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("late one"));
    }

    #[tokio::test]
    async fn test_sign_in_required() {
        let (outcome, out) = run_with(api_with_tasks().await, None, list_all()).await;

        assert_eq!(outcome, RunOutcome::SignInRequired);
        assert_eq!(out, "Sign in required: http://signin\n");
    }

    #[tokio::test]
    async fn test_add_edit_delete() {
        let api = api_with_tasks().await;

        let (outcome, out) = run_with(
            api.clone(),
            Some("u-1"),
            Commands::Add {
                title: "new".to_string(),
                description: String::new(),
                date: Some("2024-05-10".to_string()),
                status: TaskStatus::Normal,
            },
        )
        .await;
        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(out, "[ok] Task created successfully!\n");

        let id = api.snapshot()[0].id.to_string();
        let (outcome, out) = run_with(
            api.clone(),
            Some("u-1"),
            Commands::Edit {
                id: id.clone(),
                title: None,
                description: None,
                date: None,
                status: Some(TaskStatus::Completed),
            },
        )
        .await;
        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(out, "[ok] Task updated successfully!\n");
        assert_eq!(api.snapshot()[0].status, TaskStatus::Completed);
        assert_eq!(api.snapshot()[0].title, "late one", "untouched fields kept");

        let (outcome, out) =
            run_with(api.clone(), Some("u-1"), Commands::Delete { id }).await;
        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(out, "[ok] Task deleted successfully!\n");
        assert_eq!(api.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_unknown_task() {
        let command = Commands::Edit {
            id: "nope".to_string(),
            title: Some("x".to_string()),
            description: None,
            date: None,
            status: None,
        };
        let (outcome, out) = run_with(api_with_tasks().await, Some("u-1"), command).await;

        assert_eq!(outcome, RunOutcome::Failed);
        assert_eq!(out, "[error] Task nope not found\n");
    }

    #[tokio::test]
    async fn test_store_down() {
        let api = api_with_tasks().await;
        api.set_unavailable(true);

        let (outcome, out) = run_with(api, Some("u-1"), list_all()).await;

        assert_eq!(outcome, RunOutcome::Failed);
        assert_eq!(out, "[error] Failed to fetch tasks\n");
    }
}
