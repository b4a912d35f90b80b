//! Inference platform HTTP clients

mod factory;
mod http_client;
mod novita;

pub use factory::NovitaClientFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use novita::{NovitaClient, DEFAULT_NOVITA_BASE_URL};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
