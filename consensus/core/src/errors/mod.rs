pub mod atomical_id;
pub mod bitwork;
pub mod payload;
pub mod spent;
