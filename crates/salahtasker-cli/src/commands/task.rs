//! Task management commands.

use clap::Subcommand;
use salahtasker_core::{Database, NewTask, SalahPeriod, SlotMove, Task, TaskUpdate};
use uuid::Uuid;

use super::parse_date;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Salah slot id 0-6 (0 = before Fajr, 6 = after Isha)
        #[arg(long)]
        slot: u8,
        /// Date as yyyy-MM-dd (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// List tasks for a date, grouped by slot
    List {
        /// Date as yyyy-MM-dd (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Get task details as JSON
    Get {
        /// Task ID
        id: String,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Update a task (unset fields are kept)
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        slot: Option<u8>,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Move a task to another salah slot
    Move {
        /// Task ID
        id: String,
        /// Target slot id 0-6
        slot: u8,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Toggle a task's completion state
    Toggle {
        /// Task ID
        id: String,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
        #[arg(long, default_value = "local")]
        user: String,
    },
}

fn parse_slot(id: u8) -> Result<SalahPeriod, Box<dyn std::error::Error>> {
    SalahPeriod::from_id(id).ok_or_else(|| format!("invalid slot id {id}; expected 0-6").into())
}

fn parse_id(raw: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    Uuid::parse_str(raw).map_err(|_| format!("invalid task id {raw:?}").into())
}

fn print_task(task: &Task) {
    let done = if task.is_completed { "x" } else { " " };
    println!("  [{done}] {}  {}", task.id, task.title);
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        TaskAction::Create {
            title,
            description,
            slot,
            date,
            user,
        } => {
            let task = db.create_task(
                &user,
                NewTask {
                    title,
                    description,
                    slot: parse_slot(slot)?,
                    task_date: parse_date(date.as_deref())?,
                },
            )?;
            println!("{}", task.id);
        }
        TaskAction::List { date, user } => {
            let date = parse_date(date.as_deref())?;
            let tasks = db.tasks_by_date(date, &user)?;
            for slot in SalahPeriod::ALL {
                let in_slot: Vec<&Task> = tasks.iter().filter(|t| t.slot == slot).collect();
                if in_slot.is_empty() {
                    continue;
                }
                println!("{slot}");
                for task in in_slot {
                    print_task(task);
                }
            }
        }
        TaskAction::Get { id, user } => {
            match db.task(parse_id(&id)?, &user)? {
                Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
                None => {
                    eprintln!("task not found: {id}");
                    std::process::exit(1);
                }
            }
        }
        TaskAction::Update {
            id,
            title,
            description,
            slot,
            user,
        } => {
            let slot = slot.map(parse_slot).transpose()?;
            let task = db.update_task(
                parse_id(&id)?,
                &user,
                TaskUpdate {
                    title,
                    description,
                    slot,
                    is_completed: None,
                },
            )?;
            println!("updated {} (slot: {})", task.id, task.slot);
        }
        TaskAction::Move { id, slot, user } => {
            let id = parse_id(&id)?;
            let target = parse_slot(slot)?;
            let task = db
                .task(id, &user)?
                .ok_or_else(|| format!("task not found: {id}"))?;

            let Some(mv) = SlotMove::begin(&task, target) else {
                println!("already in {target}");
                return Ok(());
            };

            // Optimistic move: persist, then confirm against the stored
            // record; on mismatch re-fetch the day's list.
            let persisted = db.update_task(id, &user, TaskUpdate::slot_only(target)).ok();
            let settled = mv.confirm(persisted.as_ref());
            if settled.needs_refetch() {
                eprintln!("move not confirmed; reloading task list");
                for task in db.tasks_by_date(task.task_date, &user)? {
                    print_task(&task);
                }
                std::process::exit(1);
            }
            println!("moved {id} to {target}");
        }
        TaskAction::Toggle { id, user } => {
            let task = db.toggle_task_complete(parse_id(&id)?, &user)?;
            let state = if task.is_completed { "done" } else { "open" };
            println!("{} is now {state}", task.id);
        }
        TaskAction::Delete { id, user } => {
            db.delete_task(parse_id(&id)?, &user)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
