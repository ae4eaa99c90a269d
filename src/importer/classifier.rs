// ==========================================
// Gestão de Leitura - Classificador de Relatórios
// ==========================================
// Pontua o conteúdo bruto contra dois conjuntos disjuntos
// de marcadores para decidir o tipo do documento; erro de
// leitura nunca propaga (degrada para UNKNOWN + diagnóstico)
// ==========================================

use crate::domain::types::ReportType;
use crate::importer::file_parser::{parse_grid, RawDocument, SheetGrid};
use tracing::debug;

/// Marcadores do relatório de porteira
const GATE_MARKERS: [&str; 4] = [
    "Conjunto de Contrato",
    "Acompanhamento de Resultados",
    "Sub-Total",
    "Total Geral",
];

/// Marcadores do relatório de não leitura
const UNREAD_MARKERS: [&str; 4] = ["Instalação", "Endereço", "Data Limite", "Reg."];

/// Limiar de marcadores distintos para porteira
const GATE_THRESHOLD: usize = 3;

/// Limiar de marcadores distintos para não leitura
const UNREAD_THRESHOLD: usize = 2;

/// Classifica o documento pelo conteúdo das células.
///
/// Retorna o tipo e uma mensagem de diagnóstico; quem chama
/// decide abortar ou prosseguir em caso de UNKNOWN.
pub fn classify(doc: &RawDocument) -> (ReportType, String) {
    let grid = match parse_grid(doc) {
        Ok(grid) => grid,
        Err(e) => {
            // Documento ilegível: nunca propaga, degrada para UNKNOWN
            return (
                ReportType::Unknown,
                format!("Falha na leitura do documento: {}", e),
            );
        }
    };

    classify_grid(&grid)
}

/// Classifica uma grade já aberta
pub fn classify_grid(grid: &SheetGrid) -> (ReportType, String) {
    let text = flatten_text(grid);

    let gate_hits = count_marker_hits(&text, &GATE_MARKERS);
    let unread_hits = count_marker_hits(&text, &UNREAD_MARKERS);

    debug!(gate_hits, unread_hits, "Pontuação de marcadores");

    // Porteira é verificada primeiro; os limiares diferem,
    // então empate real é impossível
    if gate_hits >= GATE_THRESHOLD {
        (
            ReportType::GateResult,
            format!(
                "Relatório de porteira ({}/{} marcadores encontrados)",
                gate_hits,
                GATE_MARKERS.len()
            ),
        )
    } else if unread_hits >= UNREAD_THRESHOLD {
        (
            ReportType::UnreadMeter,
            format!(
                "Relatório de não leitura ({}/{} marcadores encontrados)",
                unread_hits,
                UNREAD_MARKERS.len()
            ),
        )
    } else {
        (
            ReportType::Unknown,
            format!(
                "Tipo não identificado (porteira {}/{}, não leitura {}/{})",
                gate_hits, GATE_THRESHOLD, unread_hits, UNREAD_THRESHOLD
            ),
        )
    }
}

/// Concatena o texto de todas as células para busca de marcadores
fn flatten_text(grid: &SheetGrid) -> String {
    let mut text = String::new();
    for row in grid {
        for cell in row {
            let cell_text = cell.as_text();
            if !cell_text.is_empty() {
                text.push_str(&cell_text);
                text.push('\n');
            }
        }
    }
    text
}

/// Quantos marcadores distintos do conjunto ocorrem no texto
fn count_marker_hits(text: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| text.contains(*m)).count()
}
