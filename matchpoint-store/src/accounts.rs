use std::collections::HashMap;

use tracing::debug;

use matchpoint_domain::money::dollars_to_cents;
use matchpoint_domain::{Account, Role};

use crate::app_config::AccountsConfig;

/// All registered accounts, keyed by username. Owns the prepaid balances;
/// the ledger reaches them only through its balance callbacks.
pub struct AccountRegistry {
    accounts: HashMap<String, Account>,
}

impl AccountRegistry {
    pub fn from_config(config: &AccountsConfig) -> Self {
        let mut accounts = HashMap::new();
        for seed in &config.users {
            accounts.insert(
                seed.username.clone(),
                Account::new(
                    seed.username.clone(),
                    seed.password.clone(),
                    Role::User,
                    dollars_to_cents(seed.balance_usd),
                ),
            );
        }
        for seed in &config.admins {
            accounts.insert(
                seed.username.clone(),
                Account::new(
                    seed.username.clone(),
                    seed.password.clone(),
                    Role::Admin,
                    dollars_to_cents(seed.balance_usd),
                ),
            );
        }
        debug!(count = accounts.len(), "account registry loaded");
        Self { accounts }
    }

    /// Exact username/password/role match; anything else is a miss.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        expected_role: Role,
    ) -> Option<&Account> {
        self.accounts
            .get(username)
            .filter(|account| account.password == password && account.role == expected_role)
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn balance_cents(&self, username: &str) -> Option<i64> {
        self.accounts.get(username).map(|a| a.balance_cents)
    }

    pub fn can_afford(&self, username: &str, amount_cents: i64) -> bool {
        self.accounts
            .get(username)
            .map(|a| a.can_afford(amount_cents))
            .unwrap_or(false)
    }

    pub fn deduct(&mut self, username: &str, amount_cents: i64) -> bool {
        self.accounts
            .get_mut(username)
            .map(|a| a.deduct(amount_cents))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfig;

    fn registry() -> AccountRegistry {
        AccountRegistry::from_config(&AppConfig::default().accounts)
    }

    #[test]
    fn authenticates_seeded_users_and_admins() {
        let registry = registry();

        assert!(registry.authenticate("user1", "pass1", Role::User).is_some());
        assert!(registry
            .authenticate("admin", "adminpass", Role::Admin)
            .is_some());

        // Wrong password, wrong role, unknown user.
        assert!(registry.authenticate("user1", "wrongpass", Role::User).is_none());
        assert!(registry.authenticate("user1", "pass1", Role::Admin).is_none());
        assert!(registry.authenticate("ghost", "pass1", Role::User).is_none());
    }

    #[test]
    fn balances_load_in_cents_and_deduct() {
        let mut registry = registry();

        assert_eq!(registry.balance_cents("user1"), Some(10_000));
        assert!(registry.can_afford("user1", 10_000));
        assert!(!registry.can_afford("user1", 10_001));

        assert!(registry.deduct("user1", 2_500));
        assert_eq!(registry.balance_cents("user1"), Some(7_500));

        assert!(!registry.deduct("user1", 50_000));
        assert_eq!(registry.balance_cents("user1"), Some(7_500));
        assert!(!registry.deduct("ghost", 1));
    }
}
