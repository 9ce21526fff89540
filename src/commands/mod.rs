pub mod groups;
pub mod resources;
pub mod schedule;

// Re-export command functions for convenience
pub use groups::{add_student, create_group, delete_group, remove_student, show_group, update_group};
pub use resources::{create, delete, group_row, hall_row, list, student_row, trainer_row, update};
pub use schedule::{add_item, delete_item, grid, summary, update_item, ItemChanges};

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use dancecenter::i18n::t;
use dancecenter::models::EntityId;
use dancecenter::pages::Session;

/// Print and clear queued notifications
pub fn flush_notes(session: &mut Session) {
    for note in session.notes.drain() {
        println!("{} {}", note.level.symbol(), note.message);
    }
}

/// Ask before deleting unless `--yes` was given
pub fn confirm_delete(session: &mut Session, entity: &str, id: EntityId, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    print!("{}", t!("cli.confirm_delete", entity = entity, id = id));
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да");
    if !confirmed {
        session.notes.info(t!("cli.cancelled").to_string());
    }
    Ok(confirmed)
}

/// Report an unresolvable selector query
pub fn not_resolved(session: &mut Session, entity: &str, query: &str) -> bool {
    session
        .notes
        .error(t!("cli.not_resolved", entity = entity, query = query).to_string());
    false
}
