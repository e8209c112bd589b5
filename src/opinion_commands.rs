use crate::api_types::{OpinionInput, OpinionRecord, OpinionUpdate};
use crate::errors::{to_command_result, AppError};
use crate::feed::{ChangeKind, ContentChange, ContentCollection};
use crate::services::opinion_service;
use crate::AppState;

pub async fn create_opinion(state: &AppState, input: OpinionInput) -> Result<OpinionRecord, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let opinion = to_command_result(opinion_service::create_opinion(db.connection(), &input))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Opinions,
        &opinion.id,
        ChangeKind::Created,
    ));
    Ok(opinion)
}

pub async fn update_opinion(
    state: &AppState,
    id: String,
    update: OpinionUpdate,
) -> Result<Option<OpinionRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let updated =
        to_command_result(opinion_service::update_opinion(db.connection(), &id, &update))?;
    if let Some(opinion) = &updated {
        state.feed.publish(ContentChange::new(
            ContentCollection::Opinions,
            &opinion.id,
            ChangeKind::Updated,
        ));
    }
    Ok(updated)
}

pub async fn delete_opinion(state: &AppState, id: String) -> Result<(), String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(opinion_service::delete_opinion(db.connection(), &id))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Opinions,
        id.trim(),
        ChangeKind::Deleted,
    ));
    Ok(())
}

pub async fn list_opinions(
    state: &AppState,
    limit: Option<i64>,
) -> Result<Vec<OpinionRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(opinion_service::list_opinions(db.connection(), limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_values::TEST_IMAGE_URL;

    #[tokio::test]
    async fn test_opinion_commands() {
        let state = AppState::in_memory().unwrap();

        let opinion = create_opinion(
            &state,
            OpinionInput {
                title: "Agua y lechería".to_string(),
                body: "Texto".to_string(),
                image_url: TEST_IMAGE_URL.to_string(),
                author_name: "Carlos Soto".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = update_opinion(
            &state,
            opinion.id.clone(),
            OpinionUpdate {
                author_title: Some("Economista".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.author_title, "Economista");
        assert_eq!(list_opinions(&state, None).await.unwrap(), vec![updated]);

        let err = delete_opinion(&state, String::new()).await.unwrap_err();
        assert_eq!(err, "Falta ID de la opinión");
    }
}
