// ==========================================
// Gestão de Leitura - Biblioteca Central
// ==========================================
// Núcleo de ingestão, enriquecimento, roteamento e agregação
// dos relatórios de leitura da concessionária
// ==========================================
// Fronteira: consome bytes de planilha e fontes de referência;
// produz sequências de registros e resumos agregados. HTTP,
// persistência, credenciais, raspagem e agendamento são
// colaboradores externos
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de importação - dados externos
pub mod importer;

// Dados de referência - mapa geográfico e calendário
pub mod lookup;

// Camada de motor - regras de negócio
pub mod engine;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexporta tipos centrais
// ==========================================

// Tipos do domínio
pub use domain::types::{Cycle, ReportType, RouteStatus, UlType};

// Entidades do domínio
pub use domain::{
    AggregatedReadingResult, GroupKey, ReadingResultRecord, ReferenceEntry, ReferenceMap,
    RoutedUnreadMeterRecord, UnreadMeterRecord, UnreadParseStats,
};

// Importação
pub use importer::{
    classify, ImportError, ImportOutcome, ImportPayload, ImportResult, RawDocument,
    ReportImporter, ReportImporterImpl,
};

// Referência
pub use lookup::{load_reference_map, CalendarCache};

// Motores
pub use engine::{
    aggregate_reading_results, build_abertura_table, route_records, route_with_discovery,
    AberturaCell, AberturaTable, CycleFilter,
};

// ==========================================
// Constantes
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Gestão de Leitura";

// ==========================================
// Verificação de compilação
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
