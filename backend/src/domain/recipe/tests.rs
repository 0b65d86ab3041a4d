//! Validation coverage for recipe drafts and list filters.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn parts() -> RecipeDraftParts {
    RecipeDraftParts {
        name: "Pancakes".to_owned(),
        image: "data:image/png;base64,AAAA".to_owned(),
        text: "Whisk, rest, fry.".to_owned(),
        cooking_time: 20,
        ingredients: vec![(1, 250), (2, 2)],
        tags: vec![1, 3],
    }
}

#[rstest]
fn zero_cooking_time_is_rejected(mut parts: RecipeDraftParts) {
    parts.cooking_time = 0;
    let err = RecipeDraft::try_from_parts(parts).expect_err("zero minutes");
    assert_eq!(err, RecipeValidationError::CookingTimeTooShort);
    assert_eq!(err.field(), "cookingTime");
}

#[rstest]
fn one_minute_cooking_time_is_accepted(mut parts: RecipeDraftParts) {
    parts.cooking_time = 1;
    let draft = RecipeDraft::try_from_parts(parts).expect("one minute is enough");
    assert_eq!(draft.cooking_time().minutes(), 1);
}

#[rstest]
fn cooking_time_above_storage_range_is_rejected(mut parts: RecipeDraftParts) {
    parts.cooking_time = u32::MAX;
    assert!(matches!(
        RecipeDraft::try_from_parts(parts),
        Err(RecipeValidationError::CookingTimeTooLong { .. })
    ));
}

#[rstest]
fn zero_amount_is_rejected(mut parts: RecipeDraftParts) {
    parts.ingredients = vec![(1, 0)];
    assert_eq!(
        RecipeDraft::try_from_parts(parts),
        Err(RecipeValidationError::AmountTooSmall)
    );
}

#[rstest]
fn empty_ingredient_list_is_rejected(mut parts: RecipeDraftParts) {
    parts.ingredients.clear();
    assert_eq!(
        RecipeDraft::try_from_parts(parts),
        Err(RecipeValidationError::NoIngredients)
    );
}

#[rstest]
fn repeated_ingredient_is_rejected(mut parts: RecipeDraftParts) {
    parts.ingredients = vec![(1, 100), (1, 50)];
    assert_eq!(
        RecipeDraft::try_from_parts(parts),
        Err(RecipeValidationError::DuplicateIngredient(IngredientId::new(1)))
    );
}

#[rstest]
fn repeated_tag_is_rejected(mut parts: RecipeDraftParts) {
    parts.tags = vec![4, 4];
    let err = RecipeDraft::try_from_parts(parts).expect_err("duplicate tag");
    assert_eq!(err, RecipeValidationError::DuplicateTag(TagId::new(4)));
    assert_eq!(err.field(), "tags");
}

#[rstest]
#[case::name("name")]
#[case::image("image")]
#[case::text("text")]
fn blank_text_fields_are_rejected(mut parts: RecipeDraftParts, #[case] field: &str) {
    match field {
        "name" => parts.name = "  ".to_owned(),
        "image" => parts.image = String::new(),
        _ => parts.text = "\n".to_owned(),
    }
    let err = RecipeDraft::try_from_parts(parts).expect_err("blank field");
    assert_eq!(err.field(), field);
}

#[rstest]
fn valid_draft_keeps_order(parts: RecipeDraftParts) {
    let draft = RecipeDraft::try_from_parts(parts).expect("valid draft");
    let ids: Vec<i64> = draft
        .ingredients()
        .iter()
        .map(|line| line.ingredient_id.get())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(draft.tags(), &[TagId::new(1), TagId::new(3)]);
}

#[rstest]
fn anonymous_flag_query_matches_nothing() {
    let query = RecipeListQuery {
        is_favorited: true,
        ..RecipeListQuery::default()
    };
    assert_eq!(query.resolve(None), None);
}

#[rstest]
fn flags_resolve_to_viewer() {
    let viewer = UserId::random();
    let query = RecipeListQuery {
        is_in_shopping_cart: true,
        ..RecipeListQuery::default()
    };
    let filter = query.resolve(Some(&viewer)).expect("viewer present");
    assert_eq!(filter.in_cart_of, Some(viewer));
    assert_eq!(filter.favorited_by, None);
}

#[rstest]
fn unflagged_query_ignores_viewer() {
    let viewer = UserId::random();
    let filter = RecipeListQuery::default()
        .resolve(Some(&viewer))
        .expect("open query");
    assert_eq!(filter, RecipeFilter::default());
}
