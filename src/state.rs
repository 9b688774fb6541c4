//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::config::Config;
use crate::repository::postgres::{
    PgLoanRepository, PgSavingsPaymentRepository, PgSavingsRepository, PgSettingsRepository,
    PgShareRepository, PgTransactionRepository, PgUserRepository,
};
use crate::services::{
    LoanService, SavingsPaymentService, SavingsService, SettingsService, ShareService,
    TransactionService, UserService,
};

pub type AppAuthService = AuthService<PgUserRepository>;
pub type AppUserService = UserService<PgUserRepository>;
pub type AppLoanService = LoanService<PgLoanRepository>;
pub type AppSavingsService = SavingsService<PgSavingsRepository>;
pub type AppSavingsPaymentService = SavingsPaymentService<PgSavingsPaymentRepository>;
pub type AppShareService = ShareService<PgShareRepository>;
pub type AppTransactionService = TransactionService<PgTransactionRepository>;
pub type AppSettingsService = SettingsService<PgSettingsRepository>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: Arc<AppAuthService>,
    pub user_service: Arc<AppUserService>,
    pub loan_service: Arc<AppLoanService>,
    pub savings_service: Arc<AppSavingsService>,
    pub payment_service: Arc<AppSavingsPaymentService>,
    pub share_service: Arc<AppShareService>,
    pub transaction_service: Arc<AppTransactionService>,
    pub settings_service: Arc<AppSettingsService>,
}

impl AppState {
    /// Wire every service to its Postgres-backed repository
    pub fn new(pool: PgPool, config: Config) -> Self {
        let auth_service = AuthService::new(
            PgUserRepository::new(pool.clone()),
            config.jwt_secret.clone(),
            config.access_token_ttl_minutes,
        );

        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(UserService::new(PgUserRepository::new(pool.clone()))),
            loan_service: Arc::new(LoanService::new(PgLoanRepository::new(pool.clone()))),
            savings_service: Arc::new(SavingsService::new(PgSavingsRepository::new(pool.clone()))),
            payment_service: Arc::new(SavingsPaymentService::new(PgSavingsPaymentRepository::new(
                pool.clone(),
            ))),
            share_service: Arc::new(ShareService::new(PgShareRepository::new(pool.clone()))),
            transaction_service: Arc::new(TransactionService::new(PgTransactionRepository::new(
                pool.clone(),
            ))),
            settings_service: Arc::new(SettingsService::new(PgSettingsRepository::new(pool))),
        }
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
