pub mod prelude;

pub mod clients;
pub mod logins;
pub mod logoffs;
pub mod servers;
pub mod tokens;
pub mod users;
