//! Route definitions for the CoopFund API

mod auth;
mod loans;
mod members;
mod payments;
mod savings;
mod settings;
mod shares;
mod transactions;
mod users;

pub use auth::auth_routes;
pub use loans::loan_routes;
pub use members::member_routes;
pub use payments::payment_routes;
pub use savings::savings_routes;
pub use settings::settings_routes;
pub use shares::share_routes;
pub use transactions::transaction_routes;
pub use users::user_routes;
