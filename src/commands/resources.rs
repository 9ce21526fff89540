use anyhow::Result;

use dancecenter::i18n::t;
use dancecenter::models::{EntityId, Group, Hall, Student, Trainer};
use dancecenter::pages::{ResourcePage, Searchable, Session};

use super::confirm_delete;

/// Print the (optionally filtered) collection, one row per item
pub fn list<R: Searchable>(session: &Session, search: Option<String>, row: fn(&R) -> String) -> bool {
    let mut page = ResourcePage::<R>::new();
    page.sync(session.snapshot());
    if let Some(term) = search {
        page.set_search(term);
    }

    let rows = page.filtered();
    if rows.is_empty() {
        println!("{}", t!("cli.empty"));
    }
    for item in rows {
        println!("{}", row(item));
    }
    true
}

pub async fn create<R: Searchable>(session: &mut Session, payload: R::Payload) -> Result<bool> {
    let mut page = ResourcePage::<R>::new();
    page.sync(session.snapshot());
    Ok(page.create(session, &payload).await)
}

pub async fn update<R: Searchable>(
    session: &mut Session,
    id: EntityId,
    payload: R::Payload,
) -> Result<bool> {
    let mut page = ResourcePage::<R>::new();
    page.sync(session.snapshot());
    Ok(page.update(session, id, &payload).await)
}

pub async fn delete<R: Searchable>(session: &mut Session, id: EntityId, yes: bool) -> Result<bool> {
    let mut page = ResourcePage::<R>::new();
    page.sync(session.snapshot());
    page.request_delete(id);

    if !confirm_delete(session, &R::entity_name(), id, yes)? {
        page.cancel_delete();
        return Ok(true);
    }

    Ok(page.confirm_delete(session).await)
}

pub fn hall_row(hall: &Hall) -> String {
    let area = hall.area.map(|a| format!("{a} m²")).unwrap_or_default();
    format!("#{:<5}{:<30}{}", hall.id, hall.name, area)
}

pub fn trainer_row(trainer: &Trainer) -> String {
    format!(
        "#{:<5}{:<30}{:<20}{}",
        trainer.id, trainer.name, trainer.phone_number, trainer.dance_style
    )
}

pub fn student_row(student: &Student) -> String {
    format!("#{:<5}{:<30}{}", student.id, student.name, student.phone_number)
}

pub fn group_row(group: &Group) -> String {
    format!("#{:<5}{:<50}{}", group.id, group.summary(), group.students.len())
}
