//! Errors from the directory and document services

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Endereço de serviço inválido '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("Nenhum endereço configurado para o documento {0}")]
    MissingEndpoint(&'static str),

    #[error("Falha de rede ao acessar {url}: {message}")]
    Network { url: String, message: String },

    #[error("O serviço respondeu HTTP {status} em {url}")]
    Status { url: String, status: u16 },

    #[error("Resposta inválida de {url}: {message}")]
    Decode { url: String, message: String },

    #[error("O serviço retornou um documento vazio")]
    EmptyDocument,

    #[error("Não foi possível salvar {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
