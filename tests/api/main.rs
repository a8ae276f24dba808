mod admin_subscribers;
mod export_csv;
mod healthcheck;
mod helpers;
mod startup;
mod subscribe_email;
