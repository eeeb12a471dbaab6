pub mod charge;
pub mod health;

pub use charge::charge_order;
pub use health::health_check;
