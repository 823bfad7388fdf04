pub(crate) mod presentation;
pub(crate) mod target;
