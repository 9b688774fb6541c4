//! HTTP handlers for the CoopFund API

pub mod auth;
pub mod loans;
pub mod members;
pub mod payments;
pub mod savings;
pub mod settings;
pub mod shares;
pub mod transactions;
pub mod users;

pub use auth::*;
pub use loans::*;
pub use members::*;
pub use payments::*;
pub use savings::*;
pub use settings::*;
pub use shares::*;
pub use transactions::*;
pub use users::*;
