diesel::table! {
    categories (id) {
        id -> Text,
        name -> Text,
    }
}

diesel::table! {
    products (id) {
        id -> Text,
        name -> Text,
        category_id -> Text,
        price -> Double,
        description -> Text,
        brand -> Text,
        stock -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(products -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(categories, products,);
