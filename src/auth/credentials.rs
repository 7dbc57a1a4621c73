//! Platform credential-storage capability.
//!
//! Some runtime environments expose a credential manager that can remember
//! the user's sign-in credentials. [`CredentialStore`] models that optional
//! capability: when one is supplied to the
//! [`SaleorApi`](crate::api::SaleorApi), a successful sign-in
//! opportunistically stores the credentials; when none is supplied, nothing
//! happens and that is not an error.

/// Optional platform credential manager.
///
/// Implementations must not fail loudly: the capability is best-effort and
/// a broken credential manager must never fail a sign-in. Log and move on.
pub trait CredentialStore: Send + Sync {
    /// Stores the credentials the user just signed in with.
    fn store(&self, id: &str, password: &str);
}
