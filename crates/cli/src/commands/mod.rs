pub(crate) mod import;
pub(crate) mod search;
pub(crate) mod serve;
pub(crate) mod users;
