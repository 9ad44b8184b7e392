//! Roles known to the deployment

use indexmap::IndexMap;
use menu_shared::config::RoleSetting;
use serde::Serialize;

/// A role as presented to the builder UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub slug: String,
    pub name: String,
}

/// Fixed per deployment. Item roles outside this table are dropped on save.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: IndexMap<String, String>,
}

impl RoleTable {
    pub fn new<I, S, N>(roles: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            roles: roles
                .into_iter()
                .map(|(slug, name)| (slug.into(), name.into()))
                .collect(),
        }
    }

    pub fn from_settings(settings: &[RoleSetting]) -> Self {
        Self::new(settings.iter().map(|r| (r.slug.clone(), r.name.clone())))
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.roles.contains_key(slug)
    }

    pub fn to_list(&self) -> Vec<RoleInfo> {
        self.roles
            .iter()
            .map(|(slug, name)| RoleInfo {
                slug: slug.clone(),
                name: name.clone(),
            })
            .collect()
    }
}
