//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod order_detail;
pub mod product;
pub mod product_gift;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, Status};
pub use order_detail::{
    Column as OrderDetailColumn, Entity as OrderDetail, Model as OrderDetailModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_gift::{
    Column as ProductGiftColumn, Entity as ProductGift, Model as ProductGiftModel,
};
