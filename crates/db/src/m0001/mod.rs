mod record_create_collection_idx;
mod record_create_table;

use sqlx_migrator::vec_box;

pub struct M0001;

sqlx_migrator::sqlite_migration!(
    M0001,
    "mealmuse",
    "m0001",
    vec_box![],
    vec_box![
        record_create_table::Operation,
        record_create_collection_idx::Operation
    ]
);
