use chrono::Duration;
use recallo_db::repositories::card as card_repo;
use recallo_service::{
    ServiceError,
    cards::{self, NewCard},
    inversion,
};
use uuid::Uuid;

use crate::common::{self, TestStateBuilder, at};

#[tokio::test]
async fn test_create_card_validation() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let now = at(2026, 6, 1, 9, 0, 0);

    let user = common::db::create_user(&state, 10)
        .await
        .expect("Failed to create user");

    let result = cards::create_card(
        &state,
        user.id,
        NewCard {
            question: "Capital of Peru?".to_string(),
            answer: "Lima".to_string(),
            image_link: Some("http://img.example.com/lima.png".to_string()),
            ..NewCard::default()
        },
        now,
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let result = cards::create_card(
        &state,
        user.id,
        NewCard {
            question: "Capital of Peru?".to_string(),
            answer: "Lima".to_string(),
            parent_id: Some(Uuid::new_v4()),
            ..NewCard::default()
        },
        now,
    )
    .await;
    assert!(matches!(result, Err(ServiceError::NotFound("parent card", _))));

    let card = cards::create_card(
        &state,
        user.id,
        NewCard {
            question: "Capital of Peru?".to_string(),
            answer: "Lima".to_string(),
            image_link: Some("https://img.example.com/lima.png".to_string()),
            category: Some("geography".to_string()),
            expected_answers: vec!["Ciudad de los Reyes".to_string()],
            parent_id: None,
        },
        now,
    )
    .await
    .expect("Failed to create card");
    assert_eq!(card.owned_by, Some(user.id));
    assert_eq!(card.expected_answers, vec!["Ciudad de los Reyes".to_string()]);

    common::db::cleanup_user(&state, user.id)
        .await
        .expect("Failed to cleanup");
}

#[tokio::test]
async fn test_attach_card_is_idempotent() {
    let state = TestStateBuilder::new()
        .with_initial_interval(300)
        .build()
        .await
        .expect("Failed to create test state");
    let now = at(2026, 6, 2, 9, 0, 0);

    let author = common::db::create_user(&state, 10)
        .await
        .expect("Failed to create author");
    let learner = common::db::create_user(&state, 10)
        .await
        .expect("Failed to create learner");
    let card = common::db::create_card(&state, author.id, "Capital of Peru?", "Lima", now)
        .await
        .expect("Failed to create card");

    assert!(
        cards::attach_card(&state, learner.id, card.id, now)
            .await
            .expect("Failed to attach card")
    );
    assert!(
        !cards::attach_card(&state, learner.id, card.id, now + Duration::hours(1))
            .await
            .expect("Failed to attach card again")
    );

    // Seeded with the configured interval, not reset by the second attach
    let due = cards::due_cards(&state, learner.id, now + Duration::seconds(300), 10)
        .await
        .expect("Failed to list due cards");
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].interval_secs, 300);

    let result = cards::attach_card(&state, learner.id, Uuid::new_v4(), now).await;
    assert!(matches!(result, Err(ServiceError::NotFound("card", _))));

    common::db::cleanup_user(&state, author.id)
        .await
        .expect("Failed to cleanup author");
    common::db::cleanup_user(&state, learner.id)
        .await
        .expect("Failed to cleanup learner");
}

#[tokio::test]
async fn test_due_cards_ordering_and_limit() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let now = at(2026, 6, 3, 9, 0, 0);

    let user = common::db::create_user(&state, 10)
        .await
        .expect("Failed to create user");
    let older = common::db::create_card(&state, user.id, "First?", "One", now)
        .await
        .expect("Failed to create card");
    let newer = common::db::create_card(&state, user.id, "Second?", "Two", now + Duration::seconds(10))
        .await
        .expect("Failed to create card");

    let due = cards::due_cards(&state, user.id, now + Duration::seconds(30), 10)
        .await
        .expect("Failed to list due cards");
    assert!(due.is_empty());

    let due = cards::due_cards(&state, user.id, now + Duration::seconds(120), 10)
        .await
        .expect("Failed to list due cards");
    let ids: Vec<_> = due.iter().map(|d| d.card_id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);

    let due = cards::due_cards(&state, user.id, now + Duration::seconds(120), 1)
        .await
        .expect("Failed to list due cards");
    assert_eq!(due.len(), 1);

    let result = cards::due_cards(&state, user.id, now, 0).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    common::db::cleanup_user(&state, user.id)
        .await
        .expect("Failed to cleanup");
}

#[tokio::test]
async fn test_delete_card_cascades() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let now = at(2026, 6, 4, 9, 0, 0);

    let user = common::db::create_user(&state, 10)
        .await
        .expect("Failed to create user");
    let parent = common::db::create_card(&state, user.id, "Peru", "Country in South America", now)
        .await
        .expect("Failed to create card");
    let sub_question = cards::create_card(
        &state,
        user.id,
        NewCard {
            question: "Capital of Peru?".to_string(),
            answer: "Lima".to_string(),
            parent_id: Some(parent.id),
            ..NewCard::default()
        },
        now,
    )
    .await
    .expect("Failed to create sub-question");
    let pair = inversion::invert_card(&state, parent.id, now)
        .await
        .expect("Failed to invert card");

    let deleted = cards::delete_card(&state, parent.id)
        .await
        .expect("Failed to delete card");
    assert_eq!(deleted.id, parent.id);

    for id in [parent.id, sub_question.id, pair.inverted.id] {
        assert!(
            !card_repo::exists(&state.pool, id)
                .await
                .expect("Failed to check card")
        );
    }

    let due = cards::due_cards(&state, user.id, now + Duration::days(1), 10)
        .await
        .expect("Failed to list due cards");
    assert!(due.is_empty());

    let again = cards::delete_card(&state, parent.id).await;
    assert!(matches!(again, Err(ServiceError::NotFound(..))));

    common::db::cleanup_user(&state, user.id)
        .await
        .expect("Failed to cleanup");
}
