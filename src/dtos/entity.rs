use std::fmt::{Debug, Display};

/// A record the store can persist, addressed by a single identifier.
///
/// `id()` is `None` until the store has assigned one.
pub trait Entity: Send + Sync + 'static {
    type Id: Copy + Debug + Display + PartialEq + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;
}
