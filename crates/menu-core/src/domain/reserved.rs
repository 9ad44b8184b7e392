//! Route slugs owned by the platform's built-in account pages

/// Never registered as custom routes, whatever the configuration says.
pub const RESERVED_SLUGS: &[&str] = &[
    "dashboard",
    "orders",
    "downloads",
    "edit-address",
    "edit-account",
    "customer-logout",
    "payment-methods",
    "view-order",
    "order-pay",
    "order-received",
    "add-payment-method",
    "delete-payment-method",
    "set-default-payment-method",
    "lost-password",
];

pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}
