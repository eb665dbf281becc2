use ihub_domain::constants::{
    AUTHOR, DOMAIN_REGISTRATION, EXPERIMENT, LEAD, REFERRAL, ROLE_ADMIN, TESTIMONIAL,
};

#[test]
fn constants_match_entity_strings() {
    assert_eq!(AUTHOR, "author");
    assert_eq!(TESTIMONIAL, "testimonial");
    assert_eq!(LEAD, "lead");
    assert_eq!(REFERRAL, "referral");
    assert_eq!(EXPERIMENT, "experiment");
    assert_eq!(DOMAIN_REGISTRATION, "domain_registration");
    assert_eq!(ROLE_ADMIN, "Admin");
}
