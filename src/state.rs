use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::domain::fortune::AiClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub ai_client: AiClient,
}
