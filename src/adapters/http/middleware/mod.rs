//! HTTP middleware and extractors.

mod identity;

pub use identity::{
    Caller, IdentityRejection, RequireUser, REQUEST_ID_HEADER, USER_ID_HEADER, USER_ROLE_HEADER,
};
