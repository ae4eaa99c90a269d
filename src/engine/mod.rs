// ==========================================
// Gestão de Leitura - Camada de Motor
// ==========================================
// Responsabilidade: regras de negócio sobre registros já
// estruturados (roteamento regional, ciclo rural, agregação)
// Restrição: toda regra que nega produz um motivo legível
// ==========================================

pub mod aggregator;
pub mod cycle;
pub mod router;

// Reexporta motores centrais
pub use aggregator::{
    aggregate_reading_results, build_abertura_table, pending_by_reason, safe_percent,
    AberturaCell, AberturaTable,
};
pub use cycle::CycleFilter;
pub use router::{discover_reference_path, route_records, route_with_discovery};
