//! Well-known entity and role names shared across slices.

/// Record table names (one table per slice entity).
pub const AUTHOR: &str = "author";
pub const TESTIMONIAL: &str = "testimonial";
pub const LEAD: &str = "lead";
pub const REFERRAL: &str = "referral";
pub const EXPERIMENT: &str = "experiment";
pub const DOMAIN_REGISTRATION: &str = "domain_registration";

/// The single privileged role. Carried in the JWT `roles` claim.
pub const ROLE_ADMIN: &str = "Admin";

/// OpenAPI tags.
pub const TAG_SYSTEM: &str = "System";
pub const TAG_AUTHORS: &str = "Authors";
pub const TAG_TESTIMONIALS: &str = "Testimonials";
pub const TAG_LEADS: &str = "Leads";
pub const TAG_REFERRALS: &str = "Referrals";
pub const TAG_EXPERIMENTS: &str = "Experiments";
pub const TAG_DOMAINS: &str = "Domains";
pub const TAG_BOOKS: &str = "Books";
pub const TAG_BILLING: &str = "Billing";
