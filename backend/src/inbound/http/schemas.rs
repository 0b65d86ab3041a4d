//! OpenAPI schemas for paginated response envelopes.
//!
//! `pagination::Page<T>` stays free of utoipa so the crate has no framework
//! dependency. These structs mirror its serialised shape for each concrete
//! item type the API pages over.

use utoipa::ToSchema;

use crate::domain::{RecipeView, SubscriptionCard, UserCard};

macro_rules! page_schema {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(ToSchema)]
        #[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
        pub struct $name {
            /// Rows matching the query across every page.
            #[schema(example = 12)]
            count: u64,
            /// Absolute link to the following page.
            #[schema(example = "http://localhost:8080/api/v1/recipes?page=3")]
            next: Option<String>,
            /// Absolute link to the preceding page.
            #[schema(example = "http://localhost:8080/api/v1/recipes")]
            previous: Option<String>,
            /// Items on this page.
            results: Vec<$item>,
        }
    };
}

page_schema!(
    /// One page of user cards.
    UserPage,
    UserCard
);
page_schema!(
    /// One page of recipes.
    RecipePage,
    RecipeView
);
page_schema!(
    /// One page of followed authors.
    SubscriptionPage,
    SubscriptionCard
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn page_schemas_use_envelope_field_names() {
        for json in [
            schema_json::<UserPage>(),
            schema_json::<RecipePage>(),
            schema_json::<SubscriptionPage>(),
        ] {
            for field in ["count", "next", "previous", "results"] {
                assert!(json.contains(field), "missing {field} in {json}");
            }
        }
    }

    #[rstest]
    fn page_schemas_have_public_names() {
        assert_eq!(UserPage::name(), "UserPage");
        assert_eq!(RecipePage::name(), "RecipePage");
        assert_eq!(SubscriptionPage::name(), "SubscriptionPage");
    }
}
