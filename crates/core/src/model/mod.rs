//! Domain entities.
//!
//! A [`User`] owns at most one [`Address`] and at most one [`Profile`].
//! Ownership is modelled as a one-directional relation: the dependent
//! record stores its owner's id, and user-side access goes through a
//! lookup-by-owner query. There are no embedded back-pointers and so no
//! reference cycles.

pub mod address;
pub mod profile;
pub mod user;

pub use address::Address;
pub use profile::{Profile, PublicProfile};
pub use user::User;
