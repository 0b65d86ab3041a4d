//! Tests for the recipe service.

use std::collections::HashSet;
use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockCatalogRepository, MockRecipeRelationRepository, MockRecipeRepository,
    MockSubscriptionRepository, MockUserRepository,
};
use crate::domain::{
    CookingTime, Email, ErrorCode, IngredientId, PersonName, RecipeDraftParts, RecipeFilter,
    RecipeMemberships, Slug, TagId, User, UserRole, Username,
};

type TestService = RecipeService<
    MockRecipeRepository,
    MockCatalogRepository,
    MockUserRepository,
    MockRecipeRelationRepository,
    MockSubscriptionRepository,
>;

struct Mocks {
    recipes: MockRecipeRepository,
    catalog: MockCatalogRepository,
    users: MockUserRepository,
    relations: MockRecipeRelationRepository,
    subscriptions: MockSubscriptionRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            recipes: MockRecipeRepository::new(),
            catalog: MockCatalogRepository::new(),
            users: MockUserRepository::new(),
            relations: MockRecipeRelationRepository::new(),
            subscriptions: MockSubscriptionRepository::new(),
        }
    }

    fn into_service(self) -> TestService {
        RecipeService::new(RecipeRepositories {
            recipes: Arc::new(self.recipes),
            catalog: Arc::new(self.catalog),
            users: Arc::new(self.users),
            relations: Arc::new(self.relations),
            subscriptions: Arc::new(self.subscriptions),
        })
    }

    /// Let view assembly resolve `author` and report no viewer state.
    fn expect_view_of(&mut self, author: &User) {
        let author = author.clone();
        self.users
            .expect_find_many()
            .returning(move |_| Ok(vec![author.clone()]));
        self.subscriptions
            .expect_followed_among()
            .returning(|_, _| Ok(HashSet::new()));
        self.relations
            .expect_memberships()
            .returning(|_, _| Ok(RecipeMemberships::default()));
    }

    fn expect_references_exist(&mut self) {
        self.catalog
            .expect_missing_ingredients()
            .returning(|_| Ok(Vec::new()));
        self.catalog.expect_missing_tags().returning(|_| Ok(Vec::new()));
    }
}

fn user(username: &str, role: UserRole) -> User {
    User::new(
        UserId::random(),
        Email::new(format!("{username}@example.com")).expect("email"),
        Username::new(username).expect("username"),
        PersonName::new("Test", "User").expect("name"),
        role,
    )
}

fn draft() -> RecipeDraft {
    RecipeDraft::try_from_parts(RecipeDraftParts {
        name: "Pancakes".into(),
        image: "https://cdn.example.com/pancakes.png".into(),
        text: "Whisk, rest, fry.".into(),
        cooking_time: 20,
        ingredients: vec![(1, 250), (2, 2)],
        tags: vec![1],
    })
    .expect("valid draft")
}

fn record(id: i64, author: &UserId) -> RecipeRecord {
    RecipeRecord {
        id: RecipeId::new(id),
        author: author.clone(),
        name: "Pancakes".into(),
        image: "https://cdn.example.com/pancakes.png".into(),
        text: "Whisk, rest, fry.".into(),
        cooking_time: CookingTime::new(20).expect("cooking time"),
        tags: Vec::new(),
        ingredients: Vec::new(),
    }
}

#[tokio::test]
async fn get_recipe_reports_missing_recipe() {
    let mut mocks = Mocks::new();
    mocks
        .recipes
        .expect_find()
        .with(eq(RecipeId::new(9)))
        .times(1)
        .return_once(|_| Ok(None));

    let err = mocks
        .into_service()
        .get_recipe(None, RecipeId::new(9))
        .await
        .expect_err("missing recipe");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_recipe_marks_viewer_state() {
    let author = user("chef", UserRole::User);
    let viewer = UserId::random();
    let stored = record(4, author.id());
    let mut mocks = Mocks::new();
    mocks
        .recipes
        .expect_find()
        .return_once(move |_| Ok(Some(stored)));
    let author_clone = author.clone();
    mocks
        .users
        .expect_find_many()
        .return_once(move |_| Ok(vec![author_clone]));
    let author_id = author.id().clone();
    mocks
        .subscriptions
        .expect_followed_among()
        .return_once(move |_, _| Ok(HashSet::from([author_id])));
    mocks.relations.expect_memberships().return_once(|_, _| {
        Ok(RecipeMemberships {
            favorites: HashSet::from([RecipeId::new(4)]),
            cart: HashSet::new(),
        })
    });

    let view = mocks
        .into_service()
        .get_recipe(Some(viewer), RecipeId::new(4))
        .await
        .expect("recipe view");

    assert!(view.is_favorited);
    assert!(!view.is_in_shopping_cart);
    assert!(view.author.is_subscribed);
    assert_eq!(view.author.username, "chef");
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
#[tokio::test]
async fn anonymous_viewer_flag_filters_match_nothing(
    #[case] is_favorited: bool,
    #[case] is_in_shopping_cart: bool,
) {
    let mut mocks = Mocks::new();
    mocks.recipes.expect_list().never();
    let query = RecipeListQuery {
        is_favorited,
        is_in_shopping_cart,
        ..RecipeListQuery::default()
    };

    let slice = mocks
        .into_service()
        .list_recipes(None, query, PageRequest::default())
        .await
        .expect("empty page");

    assert_eq!(slice, PageSlice::empty());
}

#[tokio::test]
async fn list_recipes_passes_resolved_filter() {
    let author = user("chef", UserRole::User);
    let viewer = UserId::random();
    let expected = RecipeFilter {
        tags: vec![Slug::new("breakfast").expect("slug")],
        author: None,
        favorited_by: Some(viewer.clone()),
        in_cart_of: None,
    };
    let stored = vec![record(1, author.id()), record(2, author.id())];
    let mut mocks = Mocks::new();
    mocks
        .recipes
        .expect_list()
        .withf(move |filter, page| filter == &expected && page.page() == 1)
        .times(1)
        .return_once(move |_, _| Ok(PageSlice::new(stored, 7)));
    mocks.expect_view_of(&author);

    let query = RecipeListQuery {
        tags: vec![Slug::new("breakfast").expect("slug")],
        is_favorited: true,
        ..RecipeListQuery::default()
    };
    let slice = mocks
        .into_service()
        .list_recipes(Some(viewer), query, PageRequest::default())
        .await
        .expect("recipes");

    assert_eq!(slice.total, 7);
    let ids: Vec<_> = slice.items.iter().map(|view| view.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn create_recipe_rejects_unknown_ingredients() {
    let author = user("chef", UserRole::User);
    let mut mocks = Mocks::new();
    let found = author.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    mocks
        .catalog
        .expect_missing_ingredients()
        .return_once(|_| Ok(vec![IngredientId::new(2)]));
    mocks.recipes.expect_insert().never();

    let err = mocks
        .into_service()
        .create_recipe(author.id(), draft())
        .await
        .expect_err("unknown ingredient");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "ingredients");
    assert_eq!(details["ids"], serde_json::json!([2]));
}

#[tokio::test]
async fn create_recipe_rejects_unknown_tags() {
    let author = user("chef", UserRole::User);
    let mut mocks = Mocks::new();
    let found = author.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    mocks
        .catalog
        .expect_missing_ingredients()
        .return_once(|_| Ok(Vec::new()));
    mocks
        .catalog
        .expect_missing_tags()
        .withf(|ids| ids == [TagId::new(1)])
        .return_once(|_| Ok(vec![TagId::new(1)]));
    mocks.recipes.expect_insert().never();

    let err = mocks
        .into_service()
        .create_recipe(author.id(), draft())
        .await
        .expect_err("unknown tag");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["field"], "tags");
}

#[tokio::test]
async fn create_recipe_requires_known_actor() {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));
    mocks.recipes.expect_insert().never();

    let err = mocks
        .into_service()
        .create_recipe(&UserId::random(), draft())
        .await
        .expect_err("unknown actor");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn create_recipe_returns_stored_view() {
    let author = user("chef", UserRole::User);
    let author_id = author.id().clone();
    let mut mocks = Mocks::new();
    let found = author.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    mocks.expect_references_exist();
    let expected_author = author_id.clone();
    mocks
        .recipes
        .expect_insert()
        .withf(move |actor, draft| actor == &expected_author && draft.name().as_ref() == "Pancakes")
        .times(1)
        .return_once(|_, _| Ok(RecipeId::new(11)));
    let stored = record(11, &author_id);
    mocks
        .recipes
        .expect_find()
        .with(eq(RecipeId::new(11)))
        .return_once(move |_| Ok(Some(stored)));
    mocks.expect_view_of(&author);

    let view = mocks
        .into_service()
        .create_recipe(&author_id, draft())
        .await
        .expect("created");

    assert_eq!(view.id, RecipeId::new(11));
    assert_eq!(view.author.id, author_id);
    assert!(!view.author.is_subscribed);
}

#[tokio::test]
async fn update_recipe_forbids_other_users() {
    let author = UserId::random();
    let stranger = user("stranger", UserRole::User);
    let stored = record(3, &author);
    let mut mocks = Mocks::new();
    mocks
        .recipes
        .expect_find()
        .return_once(move |_| Ok(Some(stored)));
    let found = stranger.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    mocks.recipes.expect_replace().never();

    let err = mocks
        .into_service()
        .update_recipe(stranger.id(), RecipeId::new(3), draft())
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_recipe_reports_missing_recipe_before_permissions() {
    let mut mocks = Mocks::new();
    mocks.recipes.expect_find().return_once(|_| Ok(None));
    mocks.users.expect_find_by_id().never();

    let err = mocks
        .into_service()
        .update_recipe(&UserId::random(), RecipeId::new(3), draft())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn author_updates_own_recipe() {
    let author = user("chef", UserRole::User);
    let author_id = author.id().clone();
    let mut mocks = Mocks::new();
    let stored = record(3, &author_id);
    mocks
        .recipes
        .expect_find()
        .times(2)
        .returning(move |_| Ok(Some(stored.clone())));
    mocks.expect_references_exist();
    mocks
        .recipes
        .expect_replace()
        .with(eq(RecipeId::new(3)), mockall::predicate::always())
        .times(1)
        .return_once(|_, _| Ok(true));
    mocks.expect_view_of(&author);

    let view = mocks
        .into_service()
        .update_recipe(&author_id, RecipeId::new(3), draft())
        .await
        .expect("updated");

    assert_eq!(view.id, RecipeId::new(3));
}

#[rstest]
#[case(UserRole::Admin, None)]
#[case(UserRole::User, Some(ErrorCode::Forbidden))]
#[tokio::test]
async fn delete_recipe_allows_admins_only_besides_author(
    #[case] role: UserRole,
    #[case] expected: Option<ErrorCode>,
) {
    let actor = user("moderator", role);
    let stored = record(5, &UserId::random());
    let mut mocks = Mocks::new();
    mocks
        .recipes
        .expect_find()
        .return_once(move |_| Ok(Some(stored)));
    let found = actor.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    mocks
        .recipes
        .expect_delete()
        .times(usize::from(expected.is_none()))
        .returning(|_| Ok(true));

    let result = mocks
        .into_service()
        .delete_recipe(actor.id(), RecipeId::new(5))
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}
