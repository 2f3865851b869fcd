//! Tests for the recipe service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockRecipeRepository;
use crate::test_support::{FixedClock, pancakes_draft, user};

fn stored_pancakes() -> Recipe {
    pancakes_draft(user("alice")).into_recipe(Uuid::new_v4(), &FixedClock::default())
}

#[tokio::test]
async fn create_saves_valid_drafts() {
    let stored = stored_pancakes();
    let returned = stored.clone();
    let mut repo = MockRecipeRepository::new();
    repo.expect_save()
        .times(1)
        .withf(|draft| draft.name == "Pancakes")
        .return_once(move |_| Ok(returned));

    let service = RecipeServiceImpl::new(Arc::new(repo));
    let created = service
        .create(pancakes_draft(user("alice")))
        .await
        .expect("create succeeds");

    assert_eq!(created, stored);
}

#[tokio::test]
async fn create_rejects_blank_names_before_touching_storage() {
    let mut repo = MockRecipeRepository::new();
    repo.expect_save().never();
    let service = RecipeServiceImpl::new(Arc::new(repo));
    let draft = RecipeDraft {
        name: "  ".to_owned(),
        ..pancakes_draft(user("alice"))
    };

    let err = service.create(draft).await.expect_err("blank name");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "name");
}

#[tokio::test]
async fn update_reports_ingredient_position() {
    let mut repo = MockRecipeRepository::new();
    repo.expect_update().never();
    let service = RecipeServiceImpl::new(Arc::new(repo));
    let mut ingredients = pancakes_draft(user("alice")).ingredients;
    ingredients[2].amount = -3.0;
    let patch = RecipePatch {
        ingredients: Some(ingredients),
        ..RecipePatch::default()
    };

    let err = service
        .update(&Uuid::new_v4(), &user("alice"), patch)
        .await
        .expect_err("negative amount");

    let details = err.details().expect("details");
    assert_eq!(details["field"], "ingredients");
    assert_eq!(details["index"], 2);
}

#[tokio::test]
async fn get_passes_owner_through() {
    let id = Uuid::new_v4();
    let mut repo = MockRecipeRepository::new();
    repo.expect_find_by_id()
        .with(eq(id), eq(user("bob")))
        .times(1)
        .return_once(|_, _| Ok(None));
    let service = RecipeServiceImpl::new(Arc::new(repo));

    let found = service.get(&id, &user("bob")).await.expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[case(RecipeRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(RecipeRepositoryError::query("bad row"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_error_codes(
    #[case] failure: RecipeRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockRecipeRepository::new();
    repo.expect_find_all().return_once(move |_| Err(failure));
    let service = RecipeServiceImpl::new(Arc::new(repo));

    let err = service.list(&user("alice")).await.expect_err("repository failure");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn delete_returns_removed_snapshot() {
    let stored = stored_pancakes();
    let id = stored.id;
    let returned = stored.clone();
    let mut repo = MockRecipeRepository::new();
    repo.expect_delete_by_id()
        .with(eq(id), eq(user("alice")))
        .return_once(move |_, _| Ok(Some(returned)));
    let service = RecipeServiceImpl::new(Arc::new(repo));

    let deleted = service.delete(&id, &user("alice")).await.expect("delete succeeds");

    assert_eq!(deleted, Some(stored));
}
