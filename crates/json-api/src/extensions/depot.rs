//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;
use wallboard_app::auth::TokenClaims;

use crate::envelope::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_claims(&mut self, claims: TokenClaims);

    /// Claims placed by the bearer-token middleware.
    fn claims_or_401(&self) -> Result<&TokenClaims, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_claims(&mut self, claims: TokenClaims) {
        self.inject(claims);
    }

    fn claims_or_401(&self) -> Result<&TokenClaims, ApiError> {
        self.obtain::<TokenClaims>()
            .map_err(|_ignored| ApiError::unauthorized("Access token required"))
    }
}
