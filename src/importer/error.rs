// ==========================================
// Gestão de Leitura - Erros da Camada de Importação
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de importação
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Erros de arquivo =====
    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não suportado: {0} (apenas .xls/.xlsx/.csv)")]
    UnsupportedFormat(String),

    #[error("Falha na leitura do arquivo: {0}")]
    FileReadError(String),

    #[error("Falha no parsing da planilha: {0}")]
    SpreadsheetParseError(String),

    #[error("Falha no parsing do CSV: {0}")]
    CsvParseError(String),

    // ===== Erros de estrutura do documento =====
    #[error("Planilha sem abas")]
    EmptyWorkbook,

    #[error("Tipo de relatório não identificado: {0}")]
    UnknownReportType(String),

    // ===== Erros genéricos =====
    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Implementa From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// Implementa From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// Implementa From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::SpreadsheetParseError(err.to_string())
    }
}

/// Alias de Result da camada de importação
pub type ImportResult<T> = Result<T, ImportError>;
