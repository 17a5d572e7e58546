//! Role registry

use super::RegistryError;
use council_domain::Role;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Table of known roles
///
/// Reads vastly outnumber writes, so a single `RwLock` is enough here.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    roles: RwLock<HashMap<String, Role>>,
}

impl RoleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with [`Role::default_roles`]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for role in Role::default_roles() {
            registry.register(role);
        }
        registry
    }

    /// Insert or overwrite a role by id. Returns the role it replaced.
    pub fn register(&self, role: Role) -> Option<Role> {
        debug!("Registering role {}", role.id);
        self.roles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(role.id.clone(), role)
    }

    /// Look up a role by id
    pub fn lookup(&self, id: &str) -> Result<Role, RegistryError> {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::RoleNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Registered role ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = RoleRegistry::new();
        assert!(registry.is_empty());

        registry.register(Role::new("writer", "Writer", "llama3", "creative"));
        let role = registry.lookup("writer").unwrap();
        assert_eq!(role.name, "Writer");
        assert!(registry.contains("writer"));
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = RoleRegistry::new();
        assert_eq!(
            registry.lookup("ghost").unwrap_err(),
            RegistryError::RoleNotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_reregister_is_last_write_wins() {
        let registry = RoleRegistry::new();
        assert!(
            registry
                .register(Role::new("writer", "Writer", "llama3", "creative"))
                .is_none()
        );
        let previous = registry.register(Role::new("writer", "Novelist", "qwen2", "detailed"));

        assert_eq!(previous.unwrap().name, "Writer");
        assert_eq!(registry.len(), 1);
        let role = registry.lookup("writer").unwrap();
        assert_eq!(role.name, "Novelist");
        assert_eq!(role.model, "qwen2");
        assert_eq!(role.preset, "detailed");
    }

    #[test]
    fn test_with_defaults() {
        let registry = RoleRegistry::with_defaults();
        assert_eq!(
            registry.ids(),
            vec![
                "character_designer",
                "editor_in_chief",
                "plot_writer",
                "world_builder"
            ]
        );
    }
}
