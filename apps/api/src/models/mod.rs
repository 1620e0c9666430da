pub mod cep;
pub mod strategy;
