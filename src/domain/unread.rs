// ==========================================
// Gestão de Leitura - Registros de Não Leitura
// ==========================================
// Relatório de não leitura: medidores ainda não relidos,
// validados campo a campo na importação e roteados
// regionalmente em etapa posterior
// ==========================================

use crate::domain::types::RouteStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// UnreadMeterRecord - registro validado
// ==========================================
// Invariantes garantidas pelo parser:
// - ul: exatamente 8 dígitos
// - installation: exatamente 10 dígitos
// - due_date: texto dd/mm/aaaa
// Linha que falha em qualquer um dos três é descartada,
// nunca armazenada parcialmente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadMeterRecord {
    pub ul: String,              // Código da unidade de leitura (8 dígitos)
    pub installation: String,    // Código da instalação (10 dígitos)
    pub due_date: String,        // Data limite como texto dd/mm/aaaa
    pub reason_code: String,     // Motivo (2 dígitos; "03" quando ausente)
    pub address: Option<String>, // Endereço livre (opcional)
}

// ==========================================
// RoutedUnreadMeterRecord - registro roteado
// ==========================================
// Criado uma única vez por registro pelo roteador;
// nunca rederivado após persistência
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedUnreadMeterRecord {
    #[serde(flatten)]
    pub record: UnreadMeterRecord,

    pub regional_code: String,        // Substring [2..6] da UL (4 caracteres)
    pub locality: Option<String>,     // Localidade do mapa de referência
    pub region: Option<String>,       // Região resolvida
    pub route_status: RouteStatus,    // ROUTED / UNROUTED
    pub route_reason: Option<String>, // Motivo legível quando UNROUTED
}

// ==========================================
// UnreadParseStats - estatísticas de parsing
// ==========================================
// Observabilidade do parser: contagens retornadas e logadas,
// não fazem parte do fluxo de registros
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadParseStats {
    pub total_rows: usize,           // Linhas percorridas na grade
    pub valid_rows: usize,           // Registros emitidos
    pub missing_ul: usize,           // UL ausente ou fora do formato
    pub missing_installation: usize, // Instalação ausente ou fora do formato
    pub missing_due_date: usize,     // Data limite ausente ou fora do formato
    pub header_rows_skipped: usize,  // Linhas de cabeçalho ("reg.") ignoradas
}

impl UnreadParseStats {
    /// Linhas descartadas por falha de validação
    pub fn dropped_rows(&self) -> usize {
        self.total_rows
            .saturating_sub(self.valid_rows + self.header_rows_skipped)
    }
}
