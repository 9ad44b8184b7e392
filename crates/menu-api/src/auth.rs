//! Caller authentication and authorization for admin actions

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap};
use tracing::debug;

use menu_security::{Caller, JwtService, NonceService};
use menu_shared::config::SecuritySettings;
use menu_shared::constants::{CAPABILITY_MANAGE_MENUS, NONCE_HEADER};

use crate::error::ApiError;

pub const SAVE_MENU: &str = "save-menu";
pub const EXPORT_MENU: &str = "export-menu";
pub const IMPORT_MENU: &str = "import-menu";
pub const RESET_MENU: &str = "reset-menu";
pub const SAVE_SETTINGS: &str = "save-settings";

/// Actions that need a request nonce.
pub const ADMIN_ACTIONS: &[&str] = &[SAVE_MENU, EXPORT_MENU, IMPORT_MENU, RESET_MENU, SAVE_SETTINGS];

pub struct Authenticator {
    jwt: JwtService,
    nonces: NonceService,
}

impl Authenticator {
    pub fn new(jwt: JwtService, nonces: NonceService) -> Self {
        Self { jwt, nonces }
    }

    pub fn from_settings(security: &SecuritySettings) -> Self {
        Self::new(
            JwtService::new(security.jwt_secret.clone(), security.nonce_lifetime_secs),
            NonceService::new(security.nonce_secret.clone(), security.nonce_lifetime_secs),
        )
    }

    /// Verified caller from the bearer token.
    pub fn caller(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        self.optional_caller(headers)?
            .ok_or_else(|| ApiError::Authentication("missing bearer token".into()))
    }

    /// `None` without an `Authorization` header; an invalid token is still
    /// an error.
    pub fn optional_caller(&self, headers: &HeaderMap) -> Result<Option<Caller>, ApiError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(None);
        };
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Authentication("malformed Authorization header".into()))?;

        let claims = self
            .jwt
            .validate_token(token.trim())
            .map_err(|e| ApiError::Authentication(e.to_string()))?;
        Ok(Some(Caller::from(claims)))
    }

    /// Token, then request nonce for `action`, then capability.
    pub fn authorize(&self, headers: &HeaderMap, action: &str) -> Result<Caller, ApiError> {
        let caller = self.caller(headers)?;

        let nonce = headers
            .get(NONCE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Authentication(format!("missing nonce for {}", action)))?;
        self.nonces
            .verify(nonce, action, &caller.user_id, &caller.session_id)
            .map_err(|e| ApiError::Authentication(format!("{} ({})", e, action)))?;

        Self::require_manage(&caller)?;
        debug!("Caller {} authorized for {}", caller.user_id, action);
        Ok(caller)
    }

    /// Token and capability only. Used by the builder bootstrap, which hands
    /// out the nonces.
    pub fn authorize_builder(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        let caller = self.caller(headers)?;
        Self::require_manage(&caller)?;
        Ok(caller)
    }

    /// Fresh nonce for every admin action, bound to the caller's session.
    pub fn nonces_for(&self, caller: &Caller) -> Result<BTreeMap<String, String>, ApiError> {
        ADMIN_ACTIONS
            .iter()
            .map(|action| {
                self.nonces
                    .create(action, &caller.user_id, &caller.session_id)
                    .map(|nonce| (action.to_string(), nonce))
                    .map_err(|e| ApiError::Internal(e.to_string()))
            })
            .collect()
    }

    fn require_manage(caller: &Caller) -> Result<(), ApiError> {
        if caller.can_manage_menus() {
            Ok(())
        } else {
            Err(ApiError::Authorization(format!(
                "caller {} lacks {}",
                caller.user_id, CAPABILITY_MANAGE_MENUS
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            JwtService::new("jwt-secret-0123456789".into(), 3600),
            NonceService::new("nonce-secret-0123456789".into(), 86_400),
        )
    }

    fn headers(auth: &Authenticator, caps: &[&str], nonce_action: Option<&str>) -> HeaderMap {
        let token = auth
            .jwt
            .issue("7", "sess", ["shop_manager"], caps.iter().copied())
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        if let Some(action) = nonce_action {
            let nonce = auth.nonces.create(action, "7", "sess").unwrap();
            headers.insert(NONCE_HEADER, HeaderValue::from_str(&nonce).unwrap());
        }
        headers
    }

    #[test]
    fn test_authorized_admin() {
        let auth = authenticator();
        let caller = auth
            .authorize(&headers(&auth, &["manage_menus"], Some(SAVE_MENU)), SAVE_MENU)
            .unwrap();
        assert_eq!(caller.user_id, "7");
    }

    #[test]
    fn test_missing_token_is_authentication_error() {
        let auth = authenticator();
        assert!(matches!(
            auth.authorize(&HeaderMap::new(), SAVE_MENU),
            Err(ApiError::Authentication(_))
        ));
        assert!(auth.optional_caller(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_nonce_for_other_action_is_rejected() {
        let auth = authenticator();
        let h = headers(&auth, &["manage_menus"], Some(EXPORT_MENU));
        assert!(matches!(auth.authorize(&h, SAVE_MENU), Err(ApiError::Authentication(_))));
    }

    #[test]
    fn test_missing_capability_is_authorization_error() {
        let auth = authenticator();
        let h = headers(&auth, &["read"], Some(SAVE_MENU));
        assert!(matches!(auth.authorize(&h, SAVE_MENU), Err(ApiError::Authorization(_))));
        assert!(matches!(auth.authorize_builder(&h), Err(ApiError::Authorization(_))));
    }

    #[test]
    fn test_nonces_cover_every_admin_action() {
        let auth = authenticator();
        let caller = auth.caller(&headers(&auth, &["manage_menus"], None)).unwrap();
        let nonces = auth.nonces_for(&caller).unwrap();
        assert_eq!(nonces.len(), ADMIN_ACTIONS.len());
        assert!(auth
            .nonces
            .verify(&nonces[IMPORT_MENU], IMPORT_MENU, "7", "sess")
            .is_ok());
    }
}
