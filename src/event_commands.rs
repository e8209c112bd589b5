use crate::api_types::{EventInput, EventRecord, EventUpdate};
use crate::errors::{to_command_result, AppError};
use crate::feed::{ChangeKind, ContentChange, ContentCollection};
use crate::services::event_service;
use crate::AppState;

pub async fn create_event(state: &AppState, input: EventInput) -> Result<EventRecord, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let event = to_command_result(event_service::create_event(db.connection(), &input))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Events,
        &event.id,
        ChangeKind::Created,
    ));
    Ok(event)
}

pub async fn update_event(
    state: &AppState,
    id: String,
    update: EventUpdate,
) -> Result<Option<EventRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let updated = to_command_result(event_service::update_event(db.connection(), &id, &update))?;
    if let Some(event) = &updated {
        state.feed.publish(ContentChange::new(
            ContentCollection::Events,
            &event.id,
            ChangeKind::Updated,
        ));
    }
    Ok(updated)
}

pub async fn delete_event(state: &AppState, id: String) -> Result<(), String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(event_service::delete_event(db.connection(), &id))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Events,
        id.trim(),
        ChangeKind::Deleted,
    ));
    Ok(())
}

/// Events starting now or later, soonest first
pub async fn list_upcoming_events(
    state: &AppState,
    limit: Option<i64>,
) -> Result<Vec<EventRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(event_service::list_upcoming_events(db.connection(), limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_commands() {
        let state = AppState::in_memory().unwrap();
        let mut events = state.feed.watch(ContentCollection::Events);

        let event = create_event(
            &state,
            EventInput {
                title: "Seminario de innovación acuícola".to_string(),
                date: "2099-06-01".to_string(),
                time: "10:00".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(events.try_recv().map(|c| c.id), Some(event.id.clone()));

        let upcoming = list_upcoming_events(&state, None).await.unwrap();
        assert_eq!(upcoming, vec![event.clone()]);

        let err = update_event(
            &state,
            event.id.clone(),
            EventUpdate {
                time: Some("25:99".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err, "Fecha u hora inválidas.");

        delete_event(&state, event.id).await.unwrap();
        assert!(list_upcoming_events(&state, Some(5)).await.unwrap().is_empty());
    }
}
