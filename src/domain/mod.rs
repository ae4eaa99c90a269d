// ==========================================
// Gestão de Leitura - Camada de Domínio
// ==========================================
// Responsabilidade: entidades e tipos dos relatórios
// Restrição: sem lógica de acesso a arquivos, sem regras de motor
// ==========================================

pub mod reading;
pub mod reference;
pub mod types;
pub mod unread;

// Reexporta tipos centrais
pub use reading::{AggregatedReadingResult, GroupKey, ReadingResultRecord};
pub use reference::{CalendarKey, ReferenceEntry, ReferenceMap};
pub use types::{Cycle, ReportType, RouteStatus, UlType};
pub use unread::{RoutedUnreadMeterRecord, UnreadMeterRecord, UnreadParseStats};
