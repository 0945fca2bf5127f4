use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::ProjectStatus;
use crate::entities::{
    office_materials, paid_bills, projects, secretariats, strategic_resources, users,
};

pub mod migrator;
pub mod repositories;

pub use migrator::DEFAULT_ADMIN_EMAIL;
pub use repositories::bill::{BillChanges, BillFilter, NewBill};
pub use repositories::material::{MaterialChanges, NewMaterial};
pub use repositories::project::{NewProject, ProjectChanges};
pub use repositories::secretariat::{NewSecretariat, SecretariatChanges};
pub use repositories::strategic::{NewResource, ResourceChanges};
pub use repositories::user::NewUser;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn secretariat_repo(&self) -> repositories::secretariat::SecretariatRepository {
        repositories::secretariat::SecretariatRepository::new(self.conn.clone())
    }

    fn project_repo(&self) -> repositories::project::ProjectRepository {
        repositories::project::ProjectRepository::new(self.conn.clone())
    }

    fn bill_repo(&self) -> repositories::bill::BillRepository {
        repositories::bill::BillRepository::new(self.conn.clone())
    }

    fn material_repo(&self) -> repositories::material::MaterialRepository {
        repositories::material::MaterialRepository::new(self.conn.clone())
    }

    fn strategic_repo(&self) -> repositories::strategic::StrategicRepository {
        repositories::strategic::StrategicRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn create_user(
        &self,
        user: NewUser,
        security: &SecurityConfig,
    ) -> Result<users::Model> {
        self.user_repo().create(user, security).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list().await
    }

    // ========== Secretariats ==========

    pub async fn create_secretariat(&self, data: NewSecretariat) -> Result<secretariats::Model> {
        self.secretariat_repo().create(data).await
    }

    pub async fn get_secretariat(&self, id: i32) -> Result<Option<secretariats::Model>> {
        self.secretariat_repo().get(id).await
    }

    pub async fn list_secretariats(&self) -> Result<Vec<secretariats::Model>> {
        self.secretariat_repo().list_all().await
    }

    pub async fn list_active_secretariats_with_counts(
        &self,
    ) -> Result<Vec<(secretariats::Model, usize)>> {
        self.secretariat_repo().list_active_with_counts().await
    }

    pub async fn update_secretariat(
        &self,
        id: i32,
        changes: SecretariatChanges,
    ) -> Result<Option<secretariats::Model>> {
        self.secretariat_repo().update(id, changes).await
    }

    pub async fn deactivate_secretariat(&self, id: i32) -> Result<bool> {
        self.secretariat_repo().deactivate(id).await
    }

    pub async fn remove_secretariat(&self, id: i32) -> Result<bool> {
        self.secretariat_repo().remove(id).await
    }

    // ========== Projects ==========

    pub async fn create_project(&self, data: NewProject) -> Result<projects::Model> {
        self.project_repo().create(data).await
    }

    pub async fn get_project(&self, id: i32) -> Result<Option<projects::Model>> {
        self.project_repo().get(id).await
    }

    pub async fn list_projects(
        &self,
        secretariat_id: Option<i32>,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<projects::Model>> {
        self.project_repo().list(secretariat_id, status).await
    }

    pub async fn update_project(
        &self,
        id: i32,
        changes: ProjectChanges,
    ) -> Result<Option<projects::Model>> {
        self.project_repo().update(id, changes).await
    }

    pub async fn remove_project(&self, id: i32) -> Result<bool> {
        self.project_repo().remove(id).await
    }

    // ========== Paid bills ==========

    pub async fn create_bill(&self, data: NewBill) -> Result<paid_bills::Model> {
        self.bill_repo().create(data).await
    }

    pub async fn get_bill(&self, id: i32) -> Result<Option<paid_bills::Model>> {
        self.bill_repo().get(id).await
    }

    pub async fn list_bills(&self, filter: BillFilter) -> Result<Vec<paid_bills::Model>> {
        self.bill_repo().list(filter).await
    }

    pub async fn update_bill(
        &self,
        id: i32,
        changes: BillChanges,
    ) -> Result<Option<paid_bills::Model>> {
        self.bill_repo().update(id, changes).await
    }

    // ========== Office materials ==========

    pub async fn create_material(&self, data: NewMaterial) -> Result<office_materials::Model> {
        self.material_repo().create(data).await
    }

    pub async fn get_material(&self, id: i32) -> Result<Option<office_materials::Model>> {
        self.material_repo().get(id).await
    }

    pub async fn list_materials(&self) -> Result<Vec<office_materials::Model>> {
        self.material_repo().list().await
    }

    pub async fn update_material(
        &self,
        id: i32,
        changes: MaterialChanges,
    ) -> Result<Option<office_materials::Model>> {
        self.material_repo().update(id, changes).await
    }

    // ========== Strategic resources ==========

    pub async fn create_resource(&self, data: NewResource) -> Result<strategic_resources::Model> {
        self.strategic_repo().create(data).await
    }

    pub async fn get_resource(&self, id: i32) -> Result<Option<strategic_resources::Model>> {
        self.strategic_repo().get(id).await
    }

    pub async fn list_resources(&self) -> Result<Vec<strategic_resources::Model>> {
        self.strategic_repo().list().await
    }

    pub async fn update_resource(
        &self,
        id: i32,
        changes: ResourceChanges,
    ) -> Result<Option<strategic_resources::Model>> {
        self.strategic_repo().update(id, changes).await
    }
}
