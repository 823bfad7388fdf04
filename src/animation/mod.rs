pub(crate) mod ease;
pub(crate) mod mapping;
pub(crate) mod ops;
pub(crate) mod spring;
