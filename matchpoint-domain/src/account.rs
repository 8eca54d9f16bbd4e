use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// A registered account. One flat record with a role tag; admins carry no
/// extra state beyond the capability implied by the tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub balance_cents: i64,
}

impl Account {
    pub fn new(username: String, password: String, role: Role, balance_cents: i64) -> Self {
        Self {
            username,
            password,
            role,
            balance_cents,
        }
    }

    pub fn can_afford(&self, amount_cents: i64) -> bool {
        self.balance_cents >= amount_cents
    }

    /// Deduct from the balance if funds suffice. Refuses and leaves the
    /// balance untouched otherwise; the balance never goes negative.
    pub fn deduct(&mut self, amount_cents: i64) -> bool {
        if self.balance_cents >= amount_cents {
            self.balance_cents -= amount_cents;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduct_refuses_when_short() {
        let mut account = Account::new(
            "user1".to_string(),
            "pass1".to_string(),
            Role::User,
            500,
        );

        assert!(!account.deduct(501));
        assert_eq!(account.balance_cents, 500);

        assert!(account.deduct(500));
        assert_eq!(account.balance_cents, 0);
    }

    #[test]
    fn role_tags_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::User.as_str(), "user");
    }
}
