pub use super::clients::Entity as Clients;
pub use super::logins::Entity as Logins;
pub use super::logoffs::Entity as Logoffs;
pub use super::servers::Entity as Servers;
pub use super::tokens::Entity as Tokens;
pub use super::users::Entity as Users;
