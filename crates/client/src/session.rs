//! Session state.
//!
//! Exactly one session is live per running client; a logged-out client has
//! none. Login and register replace the session wholesale (always with an
//! empty cart - nothing persists carts server-side), logout and delete
//! clear it wholesale.
//!
//! # Concurrency contract
//!
//! All operations run on one logical control thread; suspension only
//! happens at Account Service calls. Two rules keep a slow network from
//! corrupting state:
//!
//! - at most one mutating account call is in flight per session; a second
//!   one is rejected with [`SessionError::PendingCall`]
//! - every session-replacing action bumps a generation counter, and a
//!   response issued under an older generation is discarded
//!   ([`SessionError::Stale`]) - last session-replacing action wins

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::instrument;

use our_shop_core::{Email, EmailError, Password, PasswordError, ProductId, UserId};

use crate::account::{Account, AccountApi, AccountError};
use crate::cart::{Cart, CartError, CheckoutReceipt, Settlement};
use crate::catalog::{Catalog, Product};

/// Local input validation failures, caught before any network call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Malformed email address.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Password empty or below the minimum length.
    #[error("invalid password: {0}")]
    Password(#[from] PasswordError),

    /// New password and its confirmation differ.
    #[error("new passwords do not match")]
    PasswordMismatch,
}

/// Errors from session operations.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// No session is live.
    #[error("not logged in")]
    NotLoggedIn,

    /// Another mutating account call is already in flight.
    #[error("another account operation is still in progress")]
    PendingCall,

    /// The session changed while the call was in flight; the response was
    /// discarded without being applied.
    #[error("session changed while the request was in flight")]
    Stale,

    /// Input rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cart operation rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Failure surfaced from the Account Service boundary.
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// The single authenticated identity active in the running client,
/// holding the live cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Server-assigned account id.
    pub user_id: UserId,
    /// Account email.
    pub email: Email,
    /// Whether this session has admin privileges. Admin sessions never
    /// accumulate cart lines.
    pub is_admin: bool,
    /// The session-local cart.
    pub cart: Cart,
}

impl Session {
    /// Build a fresh session from the account returned by the service.
    /// The cart always starts empty.
    fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.id,
            email: account.email.clone(),
            is_admin: account.is_admin,
            cart: Cart::new(),
        }
    }
}

#[derive(Default)]
struct SessionState {
    session: Option<Session>,
    /// Bumped on every session-replacing action.
    generation: u64,
    /// True while a mutating account call is outstanding.
    pending: bool,
}

/// Clears the pending flag when the issuing future completes or is dropped.
struct PendingGuard {
    state: Arc<Mutex<SessionState>>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.pending = false;
        }
    }
}

/// Owner of the client's session state.
///
/// Cloneable handle; clones share the same state. The inner lock is never
/// held across an await point.
pub struct SessionManager<A> {
    client: A,
    state: Arc<Mutex<SessionState>>,
}

impl<A: Clone> Clone for SessionManager<A> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: AccountApi> SessionManager<A> {
    /// Create a logged-out session manager over an account client.
    #[must_use]
    pub fn new(client: A) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // Poisoning only happens if a holder panicked, which nothing does.
        self.state.lock().expect("session state lock poisoned")
    }

    /// Mark a mutating account call as in flight, capturing the generation
    /// it was issued under and a snapshot of the session at that instant.
    ///
    /// The snapshot and the generation come from the same critical section,
    /// so an identity read off the snapshot can never refer to a different
    /// session than the one `issued` guards.
    fn begin_call(&self) -> Result<(PendingGuard, u64, Option<Session>), SessionError> {
        let mut state = self.lock();
        if state.pending {
            return Err(SessionError::PendingCall);
        }
        state.pending = true;
        let issued = state.generation;
        let snapshot = state.session.clone();
        drop(state);

        Ok((
            PendingGuard {
                state: Arc::clone(&self.state),
            },
            issued,
            snapshot,
        ))
    }

    /// Apply `mutate` only if the session has not been replaced since the
    /// call was issued under `issued`.
    fn apply_if_current<T>(
        &self,
        issued: u64,
        mutate: impl FnOnce(&mut SessionState) -> T,
    ) -> Result<T, SessionError> {
        let mut state = self.lock();
        if state.generation != issued {
            tracing::warn!(
                issued,
                current = state.generation,
                "discarding stale account service response"
            );
            return Err(SessionError::Stale);
        }
        Ok(mutate(&mut state))
    }

    // =========================================================================
    // Account operations
    // =========================================================================

    /// Log in with `email` and `password`.
    ///
    /// Validation happens before the network call. The password is only
    /// checked for emptiness here: the length rule applies to new
    /// passwords, and existing accounts may carry shorter ones. A `NoMatch`
    /// outcome leaves the session unset - never partially populated.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] for malformed input, [`AccountError`] from the
    /// boundary, [`SessionError::PendingCall`] or [`SessionError::Stale`]
    /// per the concurrency contract.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        let password = Password::existing(password).map_err(ValidationError::from)?;

        let (_pending, issued, _) = self.begin_call()?;
        let account = self.client.login(&email, &password).await?;

        self.apply_if_current(issued, |state| {
            let session = Session::from_account(&account);
            state.generation += 1;
            state.session = Some(session.clone());
            tracing::info!(user_id = %session.user_id, "logged in");
            session
        })
    }

    /// Register a new account and log it in.
    ///
    /// # Errors
    ///
    /// As [`login`](Self::login); a duplicate email surfaces as
    /// [`AccountError::Conflict`].
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<Session, SessionError> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        let password = Password::parse(password).map_err(ValidationError::from)?;

        let (_pending, issued, _) = self.begin_call()?;
        let account = self.client.register(&email, &password, is_admin).await?;

        self.apply_if_current(issued, |state| {
            let session = Session::from_account(&account);
            state.generation += 1;
            state.session = Some(session.clone());
            tracing::info!(user_id = %session.user_id, "registered and logged in");
            session
        })
    }

    /// Clear the session. Callable from any state, always succeeds, and
    /// invalidates any response still in flight.
    pub fn logout(&self) {
        let mut state = self.lock();
        state.session = None;
        state.generation += 1;
        tracing::info!("logged out");
    }

    /// Update the live session's email and, optionally, its password.
    ///
    /// Email format, password length, and the confirmation match are all
    /// checked before the service is contacted.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] without a session; otherwise as
    /// [`login`](Self::login).
    #[instrument(skip(self, new_password))]
    pub async fn update_profile(
        &self,
        new_email: &str,
        new_password: Option<(&str, &str)>,
    ) -> Result<(), SessionError> {
        let new_email = Email::parse(new_email).map_err(ValidationError::from)?;
        let password = match new_password {
            Some((password, confirmation)) => {
                let parsed = Password::parse(password).map_err(ValidationError::from)?;
                if password != confirmation {
                    return Err(ValidationError::PasswordMismatch.into());
                }
                Some(parsed)
            }
            None => None,
        };

        let (_pending, issued, snapshot) = self.begin_call()?;
        let session = snapshot.ok_or(SessionError::NotLoggedIn)?;

        let user_id = session.user_id;
        let account = Account {
            id: user_id,
            email: new_email.clone(),
            password: password.map(|p| p.expose().to_owned()),
            is_admin: session.is_admin,
        };

        self.client.update_user(&account).await?;

        self.apply_if_current(issued, |state| {
            if let Some(session) = state.session.as_mut() {
                session.email = new_email;
            }
            tracing::info!(user_id = %user_id, "profile updated");
        })
    }

    /// Delete the account behind the live session, then clear the session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] without a session; otherwise as
    /// [`login`](Self::login).
    #[instrument(skip(self))]
    pub async fn delete_profile(&self) -> Result<(), SessionError> {
        let (_pending, issued, snapshot) = self.begin_call()?;
        let user_id = snapshot
            .map(|s| s.user_id)
            .ok_or(SessionError::NotLoggedIn)?;

        self.client.delete_user(user_id).await?;

        self.apply_if_current(issued, |state| {
            state.session = None;
            state.generation += 1;
            tracing::info!(user_id = %user_id, "profile deleted");
        })
    }

    // =========================================================================
    // Cart operations (guarded pass-throughs)
    // =========================================================================

    /// Run `op` against the live session's cart, rejecting admin sessions.
    ///
    /// Nothing in the data model stops an admin cart, so the guard lives
    /// here rather than in every caller.
    fn with_cart<T>(
        &self,
        op: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, SessionError> {
        let mut state = self.lock();
        let session = state.session.as_mut().ok_or(SessionError::NotLoggedIn)?;
        if session.is_admin {
            return Err(CartError::AdminSession.into());
        }
        Ok(op(&mut session.cart)?)
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] or [`CartError::AdminSession`].
    pub fn add_to_cart(&self, product: &Product) -> Result<(), SessionError> {
        self.with_cart(|cart| {
            cart.add(product);
            Ok(())
        })
    }

    /// Adjust the quantity of a cart line by `delta`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] or [`CartError::AdminSession`].
    pub fn change_quantity(&self, product_id: ProductId, delta: i32) -> Result<(), SessionError> {
        self.with_cart(|cart| {
            cart.change_quantity(product_id, delta);
            Ok(())
        })
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] or [`CartError::AdminSession`].
    pub fn remove_item(&self, product_id: ProductId) -> Result<(), SessionError> {
        self.with_cart(|cart| {
            cart.remove(product_id);
            Ok(())
        })
    }

    /// The live cart's subtotal against `catalog`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] or [`CartError::MissingProduct`].
    pub fn cart_subtotal(&self, catalog: &Catalog) -> Result<Decimal, SessionError> {
        let state = self.lock();
        let session = state.session.as_ref().ok_or(SessionError::NotLoggedIn)?;
        Ok(session.cart.subtotal(catalog)?)
    }

    /// Check out the live cart through `settlement`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`], [`CartError::AdminSession`],
    /// [`CartError::EmptyCart`], or a settlement failure.
    pub fn checkout(
        &self,
        catalog: &Catalog,
        settlement: &mut dyn Settlement,
    ) -> Result<CheckoutReceipt, SessionError> {
        self.with_cart(|cart| cart.checkout(catalog, settlement))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Snapshot of the live session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.lock().session.is_some()
    }
}
