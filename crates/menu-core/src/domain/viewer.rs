//! The account currently viewing the menu

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    /// Customer id on the platform; `None` for anonymous visitors.
    pub customer_id: Option<String>,
    pub roles: BTreeSet<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn customer<I, S>(customer_id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            customer_id: Some(customer_id.into()),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}
