// ==========================================
// Gestão de Leitura - Tipos do Domínio
// ==========================================
// Enumerações compartilhadas entre importação,
// roteamento e agregação
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Tipo de Relatório (Report Type)
// ==========================================
// Derivado por contagem de marcadores, nunca persistido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    UnreadMeter, // Relatório de não leitura
    GateResult,  // Acompanhamento de resultados de leitura (porteira)
    Unknown,     // Não identificado
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::UnreadMeter => write!(f, "UNREAD_METER"),
            ReportType::GateResult => write!(f, "GATE_RESULT"),
            ReportType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// Situação de Roteamento (Route Status)
// ==========================================
// Todo registro de não leitura recebe exatamente uma situação;
// UNROUTED é um desfecho normal, não uma exceção
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Routed,   // Região resolvida (mapa de referência ou tabela fixa)
    Unrouted, // Região não resolvida (motivo em route_reason)
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStatus::Routed => write!(f, "ROUTED"),
            RouteStatus::Unrouted => write!(f, "UNROUTED"),
        }
    }
}

// ==========================================
// Tipo de UL (convencional / osb)
// ==========================================
// Extraído por varredura de colunas candidatas no relatório
// de porteira; ausência de token é um valor válido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UlType {
    Cnv,
    Osb,
    Indefinido,
}

impl UlType {
    /// Interpreta o token literal da célula ("CNV"/"OSB")
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "CNV" => Some(UlType::Cnv),
            "OSB" => Some(UlType::Osb),
            _ => None,
        }
    }

    /// Representação textual usada na chave de agrupamento ("" quando indefinido)
    pub fn as_key(&self) -> &'static str {
        match self {
            UlType::Cnv => "CNV",
            UlType::Osb => "OSB",
            UlType::Indefinido => "",
        }
    }
}

impl fmt::Display for UlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

// ==========================================
// Ciclo Rural (Cycle)
// ==========================================
// Seleciona quais sufixos de localidade estendidos (>= 89)
// pertencem ao faturamento solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    C97,
    C98,
    C99,
}

impl Cycle {
    /// Interpreta o seletor textual ("97"/"98"/"99")
    pub fn parse(selector: &str) -> Option<Self> {
        match selector.trim() {
            "97" => Some(Cycle::C97),
            "98" => Some(Cycle::C98),
            "99" => Some(Cycle::C99),
            _ => None,
        }
    }

    /// Número do ciclo como sufixo de localidade
    pub fn suffix(&self) -> u8 {
        match self {
            Cycle::C97 => 97,
            Cycle::C98 => 98,
            Cycle::C99 => 99,
        }
    }

    /// Par de sufixos estendidos exclusivos do ciclo
    pub fn extra_suffixes(&self) -> [u8; 2] {
        match self {
            Cycle::C97 => [90, 91],
            Cycle::C98 => [92, 93],
            Cycle::C99 => [89, 94],
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_parse() {
        assert_eq!(Cycle::parse("97"), Some(Cycle::C97));
        assert_eq!(Cycle::parse(" 98 "), Some(Cycle::C98));
        assert_eq!(Cycle::parse("99"), Some(Cycle::C99));
        assert_eq!(Cycle::parse("96"), None);
        assert_eq!(Cycle::parse(""), None);
    }

    #[test]
    fn test_cycle_extra_suffixes() {
        assert_eq!(Cycle::C97.extra_suffixes(), [90, 91]);
        assert_eq!(Cycle::C98.extra_suffixes(), [92, 93]);
        assert_eq!(Cycle::C99.extra_suffixes(), [89, 94]);
    }

    #[test]
    fn test_ul_type_from_token() {
        assert_eq!(UlType::from_token("CNV"), Some(UlType::Cnv));
        assert_eq!(UlType::from_token(" OSB "), Some(UlType::Osb));
        assert_eq!(UlType::from_token("cnv"), None);
        assert_eq!(UlType::from_token(""), None);
    }

    #[test]
    fn test_report_type_display() {
        assert_eq!(ReportType::GateResult.to_string(), "GATE_RESULT");
        assert_eq!(ReportType::UnreadMeter.to_string(), "UNREAD_METER");
        assert_eq!(ReportType::Unknown.to_string(), "UNKNOWN");
    }
}
