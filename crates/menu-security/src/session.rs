//! Authenticated caller

use std::collections::BTreeSet;

use menu_shared::constants::CAPABILITY_MANAGE_MENUS;

use crate::jwt::Claims;

/// Identity and grants carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub session_id: String,
    pub roles: BTreeSet<String>,
    pub capabilities: BTreeSet<String>,
}

impl Caller {
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn can_manage_menus(&self) -> bool {
        self.has_capability(CAPABILITY_MANAGE_MENUS)
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            session_id: claims.sid,
            roles: claims.roles,
            capabilities: claims.caps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(caps: &[&str]) -> Claims {
        Claims {
            sub: "7".into(),
            sid: "sess".into(),
            roles: BTreeSet::from(["shop_manager".to_string()]),
            caps: caps.iter().map(|c| c.to_string()).collect(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_manage_capability() {
        assert!(Caller::from(claims(&["manage_menus"])).can_manage_menus());
        assert!(!Caller::from(claims(&["read"])).can_manage_menus());
    }

    #[test]
    fn test_claims_map_to_caller() {
        let caller = Caller::from(claims(&[]));
        assert_eq!(caller.user_id, "7");
        assert_eq!(caller.session_id, "sess");
        assert!(caller.roles.contains("shop_manager"));
    }
}
