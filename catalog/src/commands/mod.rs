pub mod create_product;
pub use create_product::*;
