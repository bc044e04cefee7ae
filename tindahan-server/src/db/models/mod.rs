//! Database Models

// Serde helpers
pub mod serde_helpers;

// Tenancy
pub mod store;

// Catalog
pub mod product;

// Ledger domain
pub mod expense;
pub mod order;
pub mod transaction;

// Re-exports
pub use expense::{Expense, ExpenseCreate, ExpenseUpdate};
pub use order::{CustomerDetails, Order, OrderCreate, OrderItem, OrderLineInput, OrderType};
pub use product::{DEFAULT_PRODUCT_IMAGE, Product, ProductCreate, ProductUpdate};
pub use store::Store;
pub use transaction::{Transaction, TransactionType};
