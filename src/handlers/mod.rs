// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no identity) → Protected (X-User-ID scoping) → Elevated (X-Admin-ID)

pub mod elevated; // Tier 3: /api/admin/*
pub mod protected; // Tier 2: /api/<resource>[/:id]
pub mod public; // Tier 1: probes, contact inbox, proxy, shell

pub use elevated::admin_routes;
pub use protected::resource_routes;
