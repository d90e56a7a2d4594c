pub mod issue;
pub mod page;
pub mod ticket;
