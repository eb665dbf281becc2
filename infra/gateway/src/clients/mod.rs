mod books;
mod dns;
mod front_door;
mod google_domains;
mod stripe;
mod whmcs;
mod wikipedia;

pub use books::{AmazonBooksClient, BookHit, BookSource, PrhClient};
pub use dns::{DnsZone, DnsZoneClient};
pub use front_door::{EdgeBinding, FrontDoorClient};
pub use google_domains::{DomainAvailability, GoogleDomainsClient};
pub use stripe::{CheckoutSession, StripeClient, StripeCustomer};
pub use whmcs::{WhmcsClient, WhmcsOrder};
pub use wikipedia::{WikiSummary, WikipediaClient};
