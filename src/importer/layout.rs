// ==========================================
// Gestão de Leitura - Layouts Posicionais
// ==========================================
// Os relatórios chegam sem cabeçalho confiável; o vínculo
// campo semântico → índice de coluna é declarado aqui, uma
// única vez por variante de relatório, e testável de forma
// independente do parsing
// ==========================================

// ==========================================
// Layout do relatório de não leitura
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct UnreadLayout {
    pub ul: usize,           // Unidade de leitura
    pub installation: usize, // Instalação
    pub reason: usize,       // Motivo
    pub address: usize,      // Endereço
    pub due_date: usize,     // Data limite
}

/// Layout padrão do relatório de não leitura
pub const UNREAD_LAYOUT: UnreadLayout = UnreadLayout {
    ul: 0,
    installation: 4,
    reason: 9,
    address: 10,
    due_date: 26,
};

/// Marcador de linha de cabeçalho na coluna de motivo
/// (comparação de igualdade, sem diferenciar maiúsculas)
pub const UNREAD_HEADER_MARKER: &str = "reg.";

// ==========================================
// Layout do relatório de porteira
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct GateLayout {
    pub ul: usize,                     // Unidade de leitura
    pub type_candidates: [usize; 2],   // Colunas candidatas ao token CNV/OSB, em ordem
    pub planned: usize,                // Leituras previstas
    pub executed: usize,               // Leituras executadas
    pub not_executed: usize,           // Leituras não executadas
    pub reread_total: usize,           // Releituras totais
    pub reread_not_executed: usize,    // Releituras não executadas
    pub impediments: usize,            // Impedimentos
}

/// Layout padrão do relatório de porteira
pub const GATE_LAYOUT: GateLayout = GateLayout {
    ul: 0,
    type_candidates: [1, 2],
    planned: 3,
    executed: 4,
    not_executed: 5,
    reread_total: 6,
    reread_not_executed: 7,
    impediments: 8,
};

/// Prefixo da linha marcadora de conjunto de contrato
pub const CONTRACT_GROUP_MARKER: &str = "Conjunto de Contrato";

/// Linhas de totalização descartadas na coluna de UL
pub const TOTAL_ROW_MARKERS: [&str; 2] = ["Sub-Total", "Total Geral"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_layout_columns() {
        // O vínculo posicional é contrato com o sistema emissor
        assert_eq!(UNREAD_LAYOUT.ul, 0);
        assert_eq!(UNREAD_LAYOUT.installation, 4);
        assert_eq!(UNREAD_LAYOUT.reason, 9);
        assert_eq!(UNREAD_LAYOUT.address, 10);
        assert_eq!(UNREAD_LAYOUT.due_date, 26);
    }

    #[test]
    fn test_gate_layout_distinct_numeric_columns() {
        let cols = [
            GATE_LAYOUT.planned,
            GATE_LAYOUT.executed,
            GATE_LAYOUT.not_executed,
            GATE_LAYOUT.reread_total,
            GATE_LAYOUT.reread_not_executed,
            GATE_LAYOUT.impediments,
        ];
        for (i, a) in cols.iter().enumerate() {
            for b in cols.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
