// ==========================================
// Gestão de Leitura - Parser de Porteira
// ==========================================
// Linhas agrupadas sob marcadores de conjunto de contrato;
// derivações a partir da UL, enriquecimento geográfico com
// sentinelas e coerção numérica com regra de reconstrução
// de previstas
// ==========================================

use crate::domain::reading::ReadingResultRecord;
use crate::domain::reference::ReferenceMap;
use crate::domain::types::UlType;
use crate::engine::cycle::CycleFilter;
use crate::importer::file_parser::{cell_at, Cell, SheetGrid};
use crate::importer::layout::{CONTRACT_GROUP_MARKER, GATE_LAYOUT, TOTAL_ROW_MARKERS};
use tracing::{debug, info, warn};

/// Localidade sentinela para código regional fora do mapa
pub const UNKNOWN_LOCALITY: &str = "Desconhecida";

/// Região/supervisão sentinela para código regional fora do mapa
pub const UNKNOWN_REGION: &str = "N/A";

/// Faixa esperada de códigos de motivo (validação branda)
const REASON_RANGE: std::ops::RangeInclusive<u8> = 1..=18;

/// Converte a grade do relatório de porteira em registros por
/// linha, na ordem de origem.
///
/// O filtro de ciclo, quando fornecido, é aplicado apenas aos
/// sufixos estendidos (>= 89); a faixa base 1-88 sempre passa.
/// Retorno vazio é devolvido como lista vazia; quem chama decide
/// se isso configura estado de erro.
pub fn parse_gate_grid(
    grid: &SheetGrid,
    reference: &ReferenceMap,
    cycle_filter: Option<&CycleFilter>,
) -> Vec<ReadingResultRecord> {
    let mut records = Vec::new();
    let mut current_group = String::new();

    let mut group_markers = 0usize;
    let mut skipped_totals = 0usize;
    let mut rejected_ul = 0usize;
    let mut filtered_by_cycle = 0usize;

    for row in grid {
        // Linha marcadora: atualiza o conjunto de contrato corrente
        if let Some(group) = extract_contract_group(row) {
            current_group = group;
            group_markers += 1;
            continue;
        }

        let ul_raw = cell_at(row, GATE_LAYOUT.ul).as_text();
        let ul_raw = ul_raw.trim();

        if ul_raw.is_empty() {
            continue;
        }
        if TOTAL_ROW_MARKERS.iter().any(|m| ul_raw.contains(m)) {
            skipped_totals += 1;
            continue;
        }

        // Células numéricas chegam como ponto flutuante ("12345678.0")
        let ul = normalize_ul(ul_raw);
        if !is_valid_ul(&ul) {
            debug!(ul = %ul_raw, "UL rejeitada no relatório de porteira");
            rejected_ul += 1;
            continue;
        }

        let regional_code = ul[2..6].to_string();
        let locality_suffix = ul[6..8].to_string();
        let reason_code = ul[0..2].to_string();

        // Defensivo: a UL já foi validada como numérica acima
        let reason_value = match reason_code.parse::<u8>() {
            Ok(v) => v,
            Err(_) => {
                rejected_ul += 1;
                continue;
            }
        };
        if !REASON_RANGE.contains(&reason_value) {
            // Fora da faixa esperada: loga e mantém a linha
            warn!(ul = %ul, motivo = %reason_code, "Código de motivo fora da faixa 01-18");
        }

        // Pré-filtro de ciclo somente para sufixos estendidos
        if let Some(filter) = cycle_filter {
            let suffix: u8 = locality_suffix.parse().unwrap_or(0);
            if !filter.allows_suffix(suffix) {
                filtered_by_cycle += 1;
                continue;
            }
        }

        let ul_type = scan_ul_type(row);

        // Código regional fora do mapa degrada para sentinelas,
        // nunca rejeita a linha
        let (locality_name, region, supervision) = match reference.get(&regional_code) {
            Some(entry) => (
                entry.locality.clone(),
                entry.region.clone(),
                entry.supervision.clone(),
            ),
            None => (
                UNKNOWN_LOCALITY.to_string(),
                UNKNOWN_REGION.to_string(),
                UNKNOWN_REGION.to_string(),
            ),
        };

        let planned_raw = numeric_at(row, GATE_LAYOUT.planned);
        let executed = numeric_at(row, GATE_LAYOUT.executed);
        let not_executed = numeric_at(row, GATE_LAYOUT.not_executed);
        let reread_total = numeric_at(row, GATE_LAYOUT.reread_total);
        let reread_not_executed = numeric_at(row, GATE_LAYOUT.reread_not_executed);
        let impediments = numeric_at(row, GATE_LAYOUT.impediments);

        let planned = reconstruct_planned(planned_raw, executed, not_executed);

        records.push(ReadingResultRecord {
            contract_group: current_group.clone(),
            ul,
            regional_code,
            ul_type,
            locality_suffix,
            reason_code,
            locality_name,
            region,
            supervision,
            planned_count: planned,
            not_executed_count: not_executed,
            reread_total,
            reread_not_executed,
            impediments_count: impediments,
        });
    }

    info!(
        emitidos = records.len(),
        conjuntos = group_markers,
        totalizacoes = skipped_totals,
        ul_rejeitadas = rejected_ul,
        filtrados_ciclo = filtered_by_cycle,
        "Parsing de porteira concluído"
    );

    records
}

/// Procura na linha um marcador "Conjunto de Contrato: X" e
/// devolve o nome do conjunto
fn extract_contract_group(row: &[Cell]) -> Option<String> {
    for cell in row {
        let text = cell.as_text();
        let text = text.trim();
        if let Some(rest) = text.strip_prefix(CONTRACT_GROUP_MARKER) {
            let group = rest.trim_start_matches(':').trim();
            return Some(group.to_string());
        }
    }
    None
}

/// Remove o sufixo ".0" de células numéricas renderizadas como texto
fn normalize_ul(raw: &str) -> String {
    raw.trim().trim_end_matches(".0").to_string()
}

/// UL válida: exatamente 8 dígitos ASCII
fn is_valid_ul(ul: &str) -> bool {
    ul.len() == 8 && ul.chars().all(|c| c.is_ascii_digit())
}

/// Varredura ordenada das colunas candidatas ao token de tipo;
/// a primeira ocorrência de "CNV"/"OSB" vence
fn scan_ul_type(row: &[Cell]) -> UlType {
    for &col in &GATE_LAYOUT.type_candidates {
        if let Some(ul_type) = UlType::from_token(&cell_at(row, col).as_text()) {
            return ul_type;
        }
    }
    UlType::Indefinido
}

/// Contagem em coluna fixa, coagida para 0.0 quando ausente,
/// não numérica ou negativa
fn numeric_at(row: &[Cell], index: usize) -> f64 {
    cell_at(row, index).as_number().unwrap_or(0.0).max(0.0)
}

/// Regra de negócio "reconstrução de previstas": quando a coluna
/// bruta de previstas é não positiva mas executadas ou não
/// executadas é positiva, previstas passa a ser a soma das duas.
/// Protege contra inconsistência conhecida de mapeamento de
/// colunas no sistema emissor.
fn reconstruct_planned(planned_raw: f64, executed: f64, not_executed: f64) -> f64 {
    if planned_raw <= 0.0 && (executed > 0.0 || not_executed > 0.0) {
        executed + not_executed
    } else {
        planned_raw
    }
}
