pub use super::office_materials::Entity as OfficeMaterials;
pub use super::paid_bills::Entity as PaidBills;
pub use super::projects::Entity as Projects;
pub use super::secretariats::Entity as Secretariats;
pub use super::strategic_resources::Entity as StrategicResources;
pub use super::users::Entity as Users;
