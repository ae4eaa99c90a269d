// ==========================================
// Gestão de Leitura - Dados de Referência
// ==========================================
// Responsabilidade: carga do mapa geográfico e do
// calendário de faixas (único cache entre chamadas)
// ==========================================

pub mod calendar;
pub mod reference_map;

pub use calendar::CalendarCache;
pub use reference_map::{build_reference_map, derive_regional_code, load_reference_map};
