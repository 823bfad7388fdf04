pub(crate) mod intro;
pub(crate) mod ui;
