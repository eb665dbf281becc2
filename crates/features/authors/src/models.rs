use ihub_derive::api_model;

/// An author profile as returned by the API.
#[api_model]
pub struct Author {
    /// Record ID
    pub id: String,
    /// Owning user (UPN)
    pub upn: String,
    /// Public pen name
    pub pen_name: String,
    /// Short biography
    pub bio: Option<String>,
    /// Personal website
    pub website: Option<String>,
    /// Writing genres
    pub genres: Vec<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Payload for creating an author profile.
#[api_model]
pub struct CreateAuthor {
    pub pen_name: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Partial update for an author profile. Absent fields are left untouched.
#[api_model]
pub struct UpdateAuthor {
    pub pen_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
}
