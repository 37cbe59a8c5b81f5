// handlers/elevated/mod.rs - Elevated handlers (admin identity required)
//
// Administrative endpoints: store-wide counters, listings across every user
// and the destructive data wipe.
//
// Security Level: X-Admin-ID header present (no credential check)
// Route Prefix: /api/admin/*
// Middleware: require_admin_middleware (OPTIONS passes through)

pub mod admin;

pub use admin::routes as admin_routes;
