pub(crate) mod edge;
pub(crate) mod host;
pub(crate) mod range;
pub(crate) mod reveal;
pub(crate) mod tracker;
