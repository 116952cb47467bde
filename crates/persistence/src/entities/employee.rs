//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the employees table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub login_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EmployeeEntity> for domain::models::Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            role: entity.role,
            phone: entity.phone,
            email: entity.email,
            active: entity.active,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Employee;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[test]
    fn test_employee_entity_into_domain_drops_login_code() {
        let name: String = Name().fake();
        let entity = EmployeeEntity {
            id: Uuid::new_v4(),
            name: name.clone(),
            role: "monteur".to_string(),
            phone: "0612345678".to_string(),
            email: String::new(),
            login_code: "4321".to_string(),
            active: true,
            created_at: Utc::now(),
        };
        let employee: Employee = entity.into();
        assert_eq!(employee.name, name);
        assert_eq!(employee.role, "monteur");
        assert!(employee.active);
        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("4321"));
    }
}
