//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Provisioned accounts. Passwords are stored as hex SHA-256 digests.
    users (id) {
        id -> Uuid,
        #[max_length = 254]
        email -> Varchar,
        #[max_length = 150]
        username -> Varchar,
        #[max_length = 150]
        first_name -> Varchar,
        #[max_length = 150]
        last_name -> Varchar,
        #[max_length = 16]
        role -> Varchar,
        #[max_length = 64]
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe labels. `color` and `slug` are unique.
    tags (id) {
        id -> Int8,
        #[max_length = 200]
        name -> Varchar,
        #[max_length = 7]
        color -> Varchar,
        #[max_length = 200]
        slug -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Int8,
        #[max_length = 200]
        name -> Varchar,
        #[max_length = 200]
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    recipes (id) {
        id -> Int8,
        author_id -> Uuid,
        #[max_length = 200]
        name -> Varchar,
        image -> Text,
        text -> Text,
        cooking_time -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient lines of a recipe; `id` preserves submission order.
    recipe_ingredients (id) {
        id -> Int8,
        recipe_id -> Int8,
        ingredient_id -> Int8,
        amount -> Int4,
    }
}

diesel::table! {
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    favorites (id) {
        id -> Int8,
        user_id -> Uuid,
        recipe_id -> Int8,
    }
}

diesel::table! {
    shopping_cart (id) {
        id -> Int8,
        user_id -> Uuid,
        recipe_id -> Int8,
    }
}

diesel::table! {
    /// Follower (`user_id`) to author (`author_id`) pairs.
    subscriptions (id) {
        id -> Int8,
        user_id -> Uuid,
        author_id -> Uuid,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(shopping_cart -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_ingredients,
    recipe_tags,
    favorites,
    shopping_cart,
    subscriptions,
);
