// ドメインモデル（エンティティと値オブジェクト）

mod value_objects;
mod product;
mod cart;
mod order;

pub use value_objects::{
    ProductId, OrderId, CartId,
    Money, Currency,
    PaymentMethod,
    OrderStatus,
    DeliveryAddress,
};

pub use product::{Product, SharedProduct};
pub use cart::{Cart, CartLine};
pub use order::Order;
