// ==========================================
// Gestão de Leitura - Registros de Resultado de Leitura
// ==========================================
// Relatório de porteira ("Acompanhamento de Resultados de
// Leitura"): leituras previstas vs. executadas por conjunto
// de contrato, enriquecidas geograficamente e agregadas
// ==========================================

use crate::domain::types::UlType;
use serde::{Deserialize, Serialize};

// ==========================================
// ReadingResultRecord - registro por linha
// ==========================================
// Contagens sempre não negativas; reason_code sempre com
// 2 caracteres (zero à esquerda), mesmo fora da faixa 01-18
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingResultRecord {
    // ===== Contexto =====
    pub contract_group: String, // Conjunto de contrato corrente
    pub ul: String,             // Unidade de leitura (8 dígitos)

    // ===== Derivações da UL =====
    pub regional_code: String,   // UL[2..6]
    pub ul_type: UlType,         // CNV / OSB / indefinido
    pub locality_suffix: String, // UL[6..8] (classificação de ciclo)
    pub reason_code: String,     // UL[0..2] (faixa 01-18, validação branda)

    // ===== Enriquecimento geográfico =====
    pub locality_name: String, // "Desconhecida" quando fora do mapa
    pub region: String,        // "N/A" quando fora do mapa
    pub supervision: String,   // "N/A" quando fora do mapa

    // ===== Contagens =====
    pub planned_count: f64,        // Leituras previstas
    pub not_executed_count: f64,   // Leituras não executadas
    pub reread_total: f64,         // Releituras totais
    pub reread_not_executed: f64,  // Releituras não executadas
    pub impediments_count: f64,    // Impedimentos
}

impl ReadingResultRecord {
    /// Chave composta de agrupamento (todas as dimensões, sem contagens)
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            contract_group: self.contract_group.clone(),
            ul: self.ul.clone(),
            regional_code: self.regional_code.clone(),
            ul_type: self.ul_type,
            reason_code: self.reason_code.clone(),
            locality_suffix: self.locality_suffix.clone(),
            locality_name: self.locality_name.clone(),
            region: self.region.clone(),
            supervision: self.supervision.clone(),
        }
    }
}

// ==========================================
// GroupKey - chave composta de agregação
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub contract_group: String,
    pub ul: String,
    pub regional_code: String,
    pub ul_type: UlType,
    pub reason_code: String,
    pub locality_suffix: String,
    pub locality_name: String,
    pub region: String,
    pub supervision: String,
}

// ==========================================
// AggregatedReadingResult - agregado por chave
// ==========================================
// Contagens somadas entre chaves duplicadas;
// percent_not_executed com divisão segura (0 quando
// previstas = 0, nunca NaN/infinito)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReadingResult {
    #[serde(flatten)]
    pub key: GroupKey,

    pub planned_count: f64,
    pub not_executed_count: f64,
    pub reread_total: f64,
    pub reread_not_executed: f64,
    pub impediments_count: f64,

    pub percent_not_executed: f64, // não executadas / previstas * 100
}
