use ihub_derive::api_model;

/// A reader testimonial as returned by the API.
#[api_model]
pub struct Testimonial {
    /// Record ID
    pub id: String,
    /// Owning user (UPN)
    pub upn: String,
    /// Name of the person quoted
    pub author_name: String,
    /// The testimonial text
    pub quote: String,
    /// Where the quote came from
    pub source: Option<String>,
    /// Whether an admin has approved it for display
    pub approved: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Payload for submitting a testimonial. New testimonials start unapproved.
#[api_model]
pub struct CreateTestimonial {
    pub author_name: String,
    pub quote: String,
    pub source: Option<String>,
}

/// Partial update. Approval is not settable here; use the approve endpoint.
#[api_model]
pub struct UpdateTestimonial {
    pub author_name: Option<String>,
    pub quote: Option<String>,
    pub source: Option<String>,
}
