pub mod pagination;
pub mod record;
pub mod responses;
pub mod sort;
pub mod state;
