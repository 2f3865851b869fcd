//! Diesel table definitions mirroring `migrations/`.
//!
//! Every table carries a `seq` column filled from a sequence on insert; list
//! queries order by it to return records in insertion order.

diesel::table! {
    recipes (id) {
        id -> Uuid,
        seq -> Int8,
        user_id -> Text,
        name -> Text,
        recipe_type -> Text,
        ingredients -> Jsonb,
        instructions -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    grocery_lists (id) {
        id -> Uuid,
        seq -> Int8,
        user_id -> Text,
        name -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    grocery_items (id) {
        id -> Uuid,
        seq -> Int8,
        list_id -> Uuid,
        name -> Text,
        quantity -> Nullable<Text>,
        checked -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(grocery_items -> grocery_lists (list_id));

diesel::allow_tables_to_appear_in_same_query!(grocery_items, grocery_lists, recipes);
