// Esquema Diesel para SQLite.
// Tablas: flows, flow_data, snapshots (corridas de capacitación) y
// session_entries (caché de identidad de la sesión).
use diesel::allow_tables_to_appear_in_same_query;
diesel::table! {
    flows (id) {
        id -> Text,
        name -> Nullable<Text>,
        status -> Nullable<Text>,
        created_at_us -> BigInt,
        current_cursor -> BigInt,
        current_version -> BigInt,
        metadata -> Text,
    }
}
diesel::table! {
    flow_data (id) {
        id -> Text,
        flow_id -> Text,
        cursor -> BigInt,
        key -> Text,
        payload -> Text,
        metadata -> Text,
        command_id -> Nullable<Text>,
        created_at_us -> BigInt,
    }
}
diesel::table! {
    snapshots (id) {
        id -> Text,
        flow_id -> Text,
        cursor -> BigInt,
        state -> Text,
        created_at_us -> BigInt,
    }
}
diesel::table! {
    session_entries (key) {
        key -> Text,
        value -> Text,
        updated_at_us -> BigInt,
    }
}
allow_tables_to_appear_in_same_query!(flows, flow_data, snapshots);
