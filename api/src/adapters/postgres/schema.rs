//! Table creation at startup

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{access_tokens, areas, mon_data, mon_groups, mon_points, mon_projects, users};

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), sea_orm::DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}

/// Sibling areas share a kind and a parent; root territories have none
const AREA_INDEXES: [&str; 2] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS areas_sibling_name \
     ON areas (kind, COALESCE(parent_id, ''), name)",
    "CREATE UNIQUE INDEX IF NOT EXISTS areas_sibling_default \
     ON areas (kind, COALESCE(parent_id, '')) WHERE is_default",
];

/// Create every table that does not exist yet
///
/// `users` is created before `access_tokens` because of the foreign key.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, areas::Entity).await?;
    for sql in AREA_INDEXES {
        db.execute_unprepared(sql).await?;
    }
    create_table(db, &schema, mon_projects::Entity).await?;
    create_table(db, &schema, mon_groups::Entity).await?;
    create_table(db, &schema, mon_points::Entity).await?;
    create_table(db, &schema, mon_data::Entity).await?;
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, access_tokens::Entity).await?;

    Ok(())
}
