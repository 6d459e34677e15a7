table! {
    venues (id) {
        id -> Integer,
        name -> Text,
        city -> Text,
        state -> Text,
        address -> Nullable<Text>,
        phone -> Nullable<Text>,
        image_link -> Nullable<Text>,
        facebook_link -> Nullable<Text>,
        website -> Nullable<Text>,
        genres -> Text,
        seeking_talent -> Bool,
        seeking_description -> Nullable<Text>,
    }
}

table! {
    artists (id) {
        id -> Integer,
        name -> Text,
        city -> Text,
        state -> Text,
        phone -> Nullable<Text>,
        image_link -> Nullable<Text>,
        facebook_link -> Nullable<Text>,
        website -> Nullable<Text>,
        genres -> Text,
        seeking_venue -> Bool,
        seeking_description -> Nullable<Text>,
    }
}

table! {
    shows (id) {
        id -> Integer,
        venue_id -> Integer,
        artist_id -> Integer,
        start_time -> Timestamp,
    }
}

joinable!(shows -> venues (venue_id));
joinable!(shows -> artists (artist_id));

allow_tables_to_appear_in_same_query!(
    venues,
    artists,
    shows,
);
