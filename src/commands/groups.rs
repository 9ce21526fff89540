use anyhow::Result;

use dancecenter::i18n::t;
use dancecenter::models::{Difficulty, EntityId, Group, GroupPayload, Student, Trainer};
use dancecenter::pages::{GroupsPage, Searchable, Session};
use dancecenter::select;

use super::{confirm_delete, not_resolved};

fn resolve_trainer(session: &mut Session, query: &str) -> Option<EntityId> {
    let found = select::trainers(session.snapshot().trainers.clone())
        .resolve(query)
        .map(|t| t.id);
    if found.is_none() {
        not_resolved(session, &Trainer::entity_name(), query);
    }
    found
}

fn resolve_student(session: &mut Session, query: &str) -> Option<EntityId> {
    let found = select::students(session.snapshot().students.clone())
        .resolve(query)
        .map(|s| s.id);
    if found.is_none() {
        not_resolved(session, &Student::entity_name(), query);
    }
    found
}

pub async fn create_group(
    session: &mut Session,
    difficulty: Difficulty,
    trainer: &str,
    students: &[String],
) -> Result<bool> {
    let Some(trainer_id) = resolve_trainer(session, trainer) else {
        return Ok(false);
    };

    let mut students_id = Vec::with_capacity(students.len());
    for query in students {
        match resolve_student(session, query) {
            Some(id) if !students_id.contains(&id) => students_id.push(id),
            Some(_) => {}
            None => return Ok(false),
        }
    }

    let payload = GroupPayload {
        difficulty,
        trainer_id: Some(trainer_id),
        students_id,
    };

    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    Ok(page.page.create(session, &payload).await)
}

/// Change difficulty or trainer, keeping the current members
pub async fn update_group(
    session: &mut Session,
    id: EntityId,
    difficulty: Option<Difficulty>,
    trainer: Option<&str>,
) -> Result<bool> {
    let Some(group) = session.snapshot().find::<Group>(id).cloned() else {
        session
            .notes
            .error(t!("groups.not_found", id = id).to_string());
        return Ok(false);
    };

    let mut payload = GroupPayload::from_group(&group);
    if let Some(difficulty) = difficulty {
        payload.difficulty = difficulty;
    }
    if let Some(query) = trainer {
        let Some(trainer_id) = resolve_trainer(session, query) else {
            return Ok(false);
        };
        payload.trainer_id = Some(trainer_id);
    }

    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    Ok(page.page.update(session, id, &payload).await)
}

/// Print one group with its members and weekly classes
pub async fn show_group(session: &mut Session, id: EntityId) -> Result<bool> {
    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    page.expand(session, id).await;

    let Some(detail) = page.detail() else {
        return Ok(false);
    };

    println!("#{} {}", detail.group.id, detail.group.summary());

    println!("\n{}:", t!("cli.members"));
    if detail.group.students.is_empty() {
        println!("  {}", t!("cli.empty"));
    }
    for student in &detail.group.students {
        println!("  #{} {} ({})", student.id, student.name, student.phone_number);
    }

    println!("\n{}:", t!("cli.group_schedule"));
    if detail.schedule.is_empty() {
        println!("  {}", t!("cli.empty"));
    }
    let mut classes = detail.schedule.clone();
    classes.sort_by_key(|item| (item.day_of_week, item.start_time));
    for item in &classes {
        let hall = item
            .hall
            .as_ref()
            .map(|h| h.name.clone())
            .or_else(|| {
                item.hall_ref()
                    .and_then(|hid| session.snapshot().halls.iter().find(|h| h.id == hid))
                    .map(|h| h.name.clone())
            })
            .unwrap_or_default();
        println!(
            "  #{} {} {} {}",
            item.id,
            item.day_of_week.short_label(),
            item.time_range(),
            hall
        );
    }

    Ok(true)
}

pub async fn add_student(session: &mut Session, group_id: EntityId, query: &str) -> Result<bool> {
    let Some(student_id) = resolve_student(session, query) else {
        return Ok(false);
    };

    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    page.expand(session, group_id).await;
    Ok(page.add_student(session, group_id, student_id).await)
}

pub async fn remove_student(
    session: &mut Session,
    group_id: EntityId,
    student_id: EntityId,
    yes: bool,
) -> Result<bool> {
    if !confirm_delete(session, &Student::entity_name(), student_id, yes)? {
        return Ok(true);
    }

    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    page.expand(session, group_id).await;
    Ok(page.remove_student(session, group_id, student_id).await)
}

pub async fn delete_group(session: &mut Session, id: EntityId, yes: bool) -> Result<bool> {
    let mut page = GroupsPage::new();
    page.sync(session.snapshot());
    page.page.request_delete(id);

    if !confirm_delete(session, &Group::entity_name(), id, yes)? {
        page.page.cancel_delete();
        return Ok(true);
    }

    Ok(page.confirm_delete(session).await)
}
