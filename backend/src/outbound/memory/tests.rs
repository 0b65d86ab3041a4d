//! Behavioural coverage for the in-memory repositories.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    Email, PersonName, RecipeDraftParts, Slug, UserRole, Username, verify_password,
};

struct Seeded {
    store: InMemoryStore,
    chef: UserId,
    guest: UserId,
    breakfast: TagId,
    flour: IngredientId,
    milk: IngredientId,
}

fn user(username: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(format!("{username}@example.com")).expect("email"),
        Username::new(username).expect("username"),
        PersonName::new("Test", "User").expect("name"),
        UserRole::User,
    )
}

fn draft(name: &str, ingredients: Vec<(i64, u32)>, tags: Vec<i64>) -> RecipeDraft {
    RecipeDraft::try_from_parts(RecipeDraftParts {
        name: name.into(),
        image: format!("{name}.png"),
        text: "Mix and cook.".into(),
        cooking_time: 10,
        ingredients,
        tags,
    })
    .expect("valid draft")
}

#[fixture]
async fn seeded() -> Seeded {
    let store = InMemoryStore::default();
    let chef = user("chef");
    let guest = user("guest");
    let (chef_id, guest_id) = (chef.id().clone(), guest.id().clone());
    store.insert_user(chef, "secret");
    store.insert_user(guest, "secret");

    let breakfast = store
        .insert_tag(&NewTag::try_from_parts("Breakfast", "#E26C2D", "breakfast").expect("tag"))
        .await
        .expect("insert tag")
        .id;
    store
        .insert_tag(&NewTag::try_from_parts("Dinner", "#49B64E", "dinner").expect("tag"))
        .await
        .expect("insert tag");
    let flour = store
        .insert_ingredient(&NewIngredient::try_from_parts("Flour", "g").expect("ingredient"))
        .await
        .expect("insert ingredient")
        .id;
    let milk = store
        .insert_ingredient(&NewIngredient::try_from_parts("Milk", "ml").expect("ingredient"))
        .await
        .expect("insert ingredient")
        .id;

    Seeded {
        store,
        chef: chef_id,
        guest: guest_id,
        breakfast,
        flour,
        milk,
    }
}

#[rstest]
#[tokio::test]
async fn credentials_are_found_by_email(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let email = Email::new("CHEF@example.com").expect("email");

    let stored = seeded
        .store
        .find_credentials(&email)
        .await
        .expect("lookup")
        .expect("credentials");

    assert_eq!(stored.user_id, seeded.chef);
    assert!(verify_password(&stored.user_id, "secret", &stored.password_digest));
}

#[rstest]
#[tokio::test]
async fn duplicate_tag_fields_are_reported(#[future] seeded: Seeded) {
    let seeded = seeded.await;

    let colour = seeded
        .store
        .insert_tag(&NewTag::try_from_parts("Brunch", "#E26C2D", "brunch").expect("tag"))
        .await;
    let slug = seeded
        .store
        .insert_tag(&NewTag::try_from_parts("Brunch", "#000000", "dinner").expect("tag"))
        .await;

    assert_eq!(colour, Err(CatalogRepositoryError::duplicate("color")));
    assert_eq!(slug, Err(CatalogRepositoryError::duplicate("slug")));
}

#[rstest]
#[case(Some("fl"), vec!["Flour"])]
#[case(Some("M"), vec!["Milk"])]
#[case(None, vec!["Flour", "Milk"])]
#[case(Some("z"), vec![])]
#[tokio::test]
async fn ingredient_prefix_ignores_case(
    #[future] seeded: Seeded,
    #[case] prefix: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let seeded = seeded.await;

    let names: Vec<String> = seeded
        .store
        .list_ingredients(prefix.map(str::to_owned))
        .await
        .expect("list")
        .into_iter()
        .map(|ingredient| String::from(ingredient.name))
        .collect();

    assert_eq!(names, expected);
}

#[rstest]
#[tokio::test]
async fn insert_rejects_unknown_references(#[future] seeded: Seeded) {
    let seeded = seeded.await;

    let result = seeded
        .store
        .insert(&seeded.chef, &draft("Ghost", vec![(999, 1)], vec![]))
        .await;

    assert!(matches!(
        result,
        Err(RecipeRepositoryError::MissingReference { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn recipes_list_newest_first_with_filters(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;
    let pancakes = store
        .insert(
            &seeded.chef,
            &draft("Pancakes", vec![(seeded.flour.get(), 200)], vec![seeded.breakfast.get()]),
        )
        .await
        .expect("insert");
    let soup = store
        .insert(&seeded.guest, &draft("Soup", vec![(seeded.milk.get(), 500)], vec![]))
        .await
        .expect("insert");

    let all = RecipeRepository::list(store, &RecipeFilter::default(), PageRequest::default())
        .await
        .expect("list");
    let ids: Vec<_> = all.items.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![soup, pancakes]);

    let tagged = RecipeRepository::list(
        store,
        &RecipeFilter {
            tags: vec![Slug::new("breakfast").expect("slug")],
            ..RecipeFilter::default()
        },
        PageRequest::default(),
    )
    .await
    .expect("list");
    assert_eq!(tagged.total, 1);
    assert_eq!(tagged.items[0].tags[0].slug.as_ref(), "breakfast");

    RecipeRelationRepository::add(store, RelationKind::Favorite, &seeded.guest, pancakes)
        .await
        .expect("favourite");
    let favourites = RecipeRepository::list(
        store,
        &RecipeFilter {
            favorited_by: Some(seeded.guest.clone()),
            ..RecipeFilter::default()
        },
        PageRequest::default(),
    )
    .await
    .expect("list");
    assert_eq!(favourites.items.len(), 1);
    assert_eq!(favourites.items[0].id, pancakes);
}

#[rstest]
#[tokio::test]
async fn relation_pairs_are_unique(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;
    let recipe = store
        .insert(&seeded.chef, &draft("Toast", vec![(seeded.flour.get(), 50)], vec![]))
        .await
        .expect("insert");

    let first = RecipeRelationRepository::add(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
        .await
        .expect("add");
    let second = RecipeRelationRepository::add(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
        .await
        .expect("add");
    let removed = RecipeRelationRepository::remove(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
        .await
        .expect("remove");
    let removed_again =
        RecipeRelationRepository::remove(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
            .await
            .expect("remove");

    assert_eq!((first, second, removed, removed_again), (true, false, true, false));
}

#[rstest]
#[tokio::test]
async fn deleting_recipe_cascades_to_relations(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;
    let recipe = store
        .insert(&seeded.chef, &draft("Crepes", vec![(seeded.flour.get(), 100)], vec![]))
        .await
        .expect("insert");
    RecipeRelationRepository::add(store, RelationKind::Favorite, &seeded.guest, recipe)
        .await
        .expect("favourite");
    RecipeRelationRepository::add(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
        .await
        .expect("cart");

    assert!(store.delete(recipe).await.expect("delete"));
    assert!(!store.delete(recipe).await.expect("second delete"));

    let memberships = store
        .memberships(&seeded.guest, &[recipe])
        .await
        .expect("memberships");
    assert_eq!(memberships, RecipeMemberships::default());
    assert!(store.cart_ingredients(&seeded.guest).await.expect("cart").is_empty());
}

#[rstest]
#[tokio::test]
async fn cart_rows_follow_cart_order(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;
    let first = store
        .insert(
            &seeded.chef,
            &draft("Pancakes", vec![(seeded.flour.get(), 200), (seeded.milk.get(), 300)], vec![]),
        )
        .await
        .expect("insert");
    let second = store
        .insert(&seeded.chef, &draft("Bread", vec![(seeded.flour.get(), 500)], vec![]))
        .await
        .expect("insert");
    for recipe in [first, second] {
        RecipeRelationRepository::add(store, RelationKind::ShoppingCart, &seeded.guest, recipe)
            .await
            .expect("cart");
    }

    let rows: Vec<_> = store
        .cart_ingredients(&seeded.guest)
        .await
        .expect("rows")
        .into_iter()
        .map(|row| (row.name, row.amount.get()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Flour".to_owned(), 200),
            ("Milk".to_owned(), 300),
            ("Flour".to_owned(), 500)
        ]
    );
}

#[rstest]
#[tokio::test]
async fn subscriptions_are_unique_and_never_self(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;

    assert!(SubscriptionRepository::add(store, &seeded.guest, &seeded.chef).await.expect("add"));
    assert!(!SubscriptionRepository::add(store, &seeded.guest, &seeded.chef).await.expect("add"));
    assert!(SubscriptionRepository::add(store, &seeded.chef, &seeded.chef).await.is_err());

    let authors = store
        .authors(&seeded.guest, PageRequest::default())
        .await
        .expect("authors");
    assert_eq!(authors.total, 1);
    assert_eq!(authors.items[0].id(), &seeded.chef);

    let followed = store
        .followed_among(&seeded.guest, &[seeded.chef.clone(), seeded.guest.clone()])
        .await
        .expect("followed");
    assert_eq!(followed, HashSet::from([seeded.chef.clone()]));
}

#[rstest]
#[tokio::test]
async fn author_summaries_are_newest_first_and_limited(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let store = &seeded.store;
    for name in ["One", "Two", "Three"] {
        store
            .insert(&seeded.chef, &draft(name, vec![(seeded.flour.get(), 1)], vec![]))
            .await
            .expect("insert");
    }

    let summaries = store
        .summaries_by_author(&seeded.chef, 2)
        .await
        .expect("summaries");
    let names: Vec<_> = summaries.iter().map(|summary| summary.name.as_str()).collect();

    assert_eq!(names, vec!["Three", "Two"]);
    assert_eq!(store.count_by_author(&seeded.chef).await.expect("count"), 3);
}
