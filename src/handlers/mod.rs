//! Terminal input dispatch.

pub(crate) mod keyboard;
pub(crate) mod mouse;
