pub(crate) mod color_filter;
pub(crate) mod color_source;
pub(crate) mod desc;
pub(crate) mod gradient;
pub(crate) mod modes;
pub(crate) mod resources;
