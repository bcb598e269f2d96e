pub mod auth_gateway;
