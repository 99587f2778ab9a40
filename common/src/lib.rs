pub mod paths;
pub mod product;
pub mod publish;
pub mod site_config;
