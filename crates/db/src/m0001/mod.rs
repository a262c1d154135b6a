mod contact_submission;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "folio",
    "m0001",
    vec_box![],
    vec_box![
        contact_submission::CreateTable,
        contact_submission::CreateIdx1,
        contact_submission::CreateIdx2,
        contact_submission::CreateIdx3,
    ]
);
