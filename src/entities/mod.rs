pub mod company;
pub mod inventory;
pub mod inventory_log;
pub mod product;
pub mod product_supplier;
pub mod sales_order;
pub mod sales_order_item;
pub mod supplier;
pub mod warehouse;
