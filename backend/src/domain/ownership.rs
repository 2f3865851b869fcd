//! Owner-scoped mutation guard shared by every repository backend.
//!
//! A mutation may only touch a record after an owner-scoped read has found it.
//! Both the durable and in-memory backends route update and delete paths
//! through [`guard_owned`], so a record that does not exist and a record owned
//! by someone else are indistinguishable to the caller: both yield `Ok(None)`.

use std::fmt::Display;
use std::future::Future;

use async_trait::async_trait;
use tracing::debug;

use super::UserId;

/// Owner-scoped read used to gate a mutation.
///
/// A store may implement this for several snapshot shapes (for example a
/// grocery list with or without its items); the guard picks the shape from
/// the mutation closure's argument type.
#[async_trait]
pub trait OwnedLookup<T>: Send + Sync {
    /// Error raised by the backing store.
    type Error: Send;
    /// Identifier type of the record.
    type Id: Display + Sync + ?Sized;

    /// Return the record with `id` only if `owner` owns it.
    async fn find_owned(&self, id: &Self::Id, owner: &UserId) -> Result<Option<T>, Self::Error>;
}

/// Run `act` on the owner's record with `id`, or do nothing.
///
/// `act` receives the snapshot read by the guard and may itself report
/// absence (for example an item missing from an owned list) by returning
/// `Ok(None)`.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use pantry::domain::ownership::{OwnedLookup, guard_owned};
/// use pantry::domain::UserId;
///
/// struct Notes(Vec<(u32, &'static str)>);
///
/// #[async_trait]
/// impl OwnedLookup<u32> for Notes {
///     type Error = ();
///     type Id = u32;
///
///     async fn find_owned(&self, id: &u32, owner: &UserId) -> Result<Option<u32>, ()> {
///         Ok(self.0.iter().find(|(n, o)| n == id && *o == owner.as_str()).map(|(n, _)| *n))
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let notes = Notes(vec![(1, "alice")]);
/// let bob = UserId::new("bob").unwrap();
/// let touched = guard_owned(&notes, &1, &bob, |n| async move { Ok(Some(n)) }).await;
/// assert_eq!(touched, Ok(None));
/// # });
/// ```
pub async fn guard_owned<L, T, R, Act, Fut>(
    lookup: &L,
    id: &L::Id,
    owner: &UserId,
    act: Act,
) -> Result<Option<R>, L::Error>
where
    L: OwnedLookup<T> + ?Sized,
    Act: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<Option<R>, L::Error>>,
{
    match lookup.find_owned(id, owner).await? {
        Some(existing) => act(existing).await,
        None => {
            debug!(%id, %owner, "owner-scoped lookup found nothing; mutation skipped");
            Ok(None)
        }
    }
}
