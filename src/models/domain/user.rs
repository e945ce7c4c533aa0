use serde::{Deserialize, Serialize};

/// Learner reference data, owned by the external user-management system.
/// Read here only to enrich attempts for the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trip() {
        let user = User {
            id: "user-1".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
        };

        let json = serde_json::to_string(&user).expect("user should serialize");
        let parsed: User = serde_json::from_str(&json).expect("user should deserialize");
        assert_eq!(parsed, user);
    }
}
