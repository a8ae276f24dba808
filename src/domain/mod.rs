mod new_subscriber;
mod sanitize;
mod site_timezone;
mod sort;
mod subscriber;
mod subscriber_email;
mod subscriber_source;

pub use new_subscriber::NewSubscriber;
pub use sanitize::{contains_forbidden, escape_html, truncate_escaped};
pub use site_timezone::SiteTimezone;
pub use sort::{Sort, SortColumn, SortDirection};
pub use subscriber::{Subscriber, SubscriberId};
pub use subscriber_email::{EmailError, SubscriberEmail};
pub use subscriber_source::{SubscriberSource, UNKNOWN_SOURCE};
