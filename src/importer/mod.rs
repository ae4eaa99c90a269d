// ==========================================
// Gestão de Leitura - Camada de Importação
// ==========================================
// Responsabilidade: bytes brutos → registros estruturados
// Suporta: Excel binário legado (.xls), Excel moderno (.xlsx), CSV
// ==========================================

// Declaração de módulos
pub mod classifier;
pub mod error;
pub mod file_parser;
pub mod gate_parser;
pub mod layout;
pub mod report_importer;
pub mod unread_parser;

// Reexporta tipos centrais
pub use classifier::{classify, classify_grid};
pub use error::{ImportError, ImportResult};
pub use file_parser::{cell_at, parse_grid, Cell, FileKind, RawDocument, SheetGrid};
pub use gate_parser::parse_gate_grid;
pub use report_importer::{ImportOutcome, ImportPayload, ReportImporter, ReportImporterImpl};
pub use unread_parser::parse_unread_grid;
