use ihub_derive::api_model;

/// A referral code owned by a user, counting successful claims.
#[api_model]
pub struct Referral {
    /// Record ID
    pub id: String,
    /// Owning user (UPN)
    pub upn: String,
    /// Shareable code
    pub code: String,
    /// Number of times the code has been claimed
    pub claims: u32,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Claim request body.
#[api_model]
pub struct ClaimReferral {
    pub code: String,
}
