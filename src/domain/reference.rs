// ==========================================
// Gestão de Leitura - Dados de Referência
// ==========================================
// Mapa geográfico (código regional → localidade/região/
// supervisão) e chave do calendário de faixas
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ReferenceEntry - entrada do mapa de referência
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub locality: String,    // Localidade
    pub supervision: String, // Supervisão
    pub region: String,      // Região
}

// ==========================================
// ReferenceMap - código regional → entrada
// ==========================================
// Carregado uma vez por invocação de parsing/roteamento;
// somente leitura após materializado
pub type ReferenceMap = HashMap<String, ReferenceEntry>;

// ==========================================
// CalendarKey - (ano, mês, faixa 1-18)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarKey {
    pub year: i32,
    pub month: u32,
    pub reason: u8, // Faixa (código de motivo 1-18)
}
