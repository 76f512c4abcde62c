use crate::domain::{
    access_log::entity::{access_log, api_usage},
    account::entity::admin,
    site::entity::{fortune_category, notice, site_setting},
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use tracing::info;

/// DB 연결을 생성하고, 설정된 경우 스키마를 동기화합니다.
pub async fn establish_connection(
    database_url: &str,
    schema_sync: bool,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if database_url.contains(":memory:") {
        // 인메모리 sqlite는 연결마다 별도 DB가 생기므로 하나로 고정
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Successfully connected to the database.");

    if schema_sync {
        sync_schema(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 기준으로 누락된 테이블과 인덱스를 생성합니다.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    create_table_if_not_exists(db, &schema, admin::Entity).await?;
    create_table_if_not_exists(db, &schema, access_log::Entity).await?;
    create_table_if_not_exists(db, &schema, api_usage::Entity).await?;
    create_table_if_not_exists(db, &schema, site_setting::Entity).await?;
    create_table_if_not_exists(db, &schema, fortune_category::Entity).await?;
    create_table_if_not_exists(db, &schema, notice::Entity).await?;

    // 로그 조회/통계는 항상 시간 역순
    create_index_if_not_exists(db, "idx_access_logs_timestamp", "access_logs", &["timestamp"])
        .await?;
    create_index_if_not_exists(
        db,
        "idx_access_logs_fortune_type",
        "access_logs",
        &["fortune_type"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table {}: {}", entity.table_name(), e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn should_create_all_tables_in_memory() {
        // Arrange & Act
        let db = establish_connection("sqlite::memory:", true).await.unwrap();

        // Assert
        assert_eq!(admin::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(access_log::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(notice::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_be_idempotent_when_synced_twice() {
        let db = establish_connection("sqlite::memory:", true).await.unwrap();

        let result = sync_schema(&db).await;

        assert!(result.is_ok());
    }
}
