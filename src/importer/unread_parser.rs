// ==========================================
// Gestão de Leitura - Parser de Não Leitura
// ==========================================
// Grade posicional sem cabeçalho confiável (índices em
// layout.rs). Os três campos obrigatórios são validados por
// expressão regular; linha reprovada é descartada e contada,
// nunca emitida parcialmente
// ==========================================

use crate::domain::unread::{UnreadMeterRecord, UnreadParseStats};
use crate::importer::file_parser::{cell_at, SheetGrid};
use crate::importer::layout::{UNREAD_HEADER_MARKER, UNREAD_LAYOUT};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static UL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").expect("regex de UL"));
static INSTALLATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("regex de instalação"));
static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("regex de data limite"));

/// Motivo atribuído quando a coluna vem em branco
const DEFAULT_REASON: &str = "03";

/// Converte a grade do relatório de não leitura em registros
/// validados, preservando a ordem das linhas de origem.
///
/// Lista vazia é um resultado válido (ainda que incomum);
/// as estatísticas acompanham o retorno para observabilidade.
pub fn parse_unread_grid(grid: &SheetGrid) -> (Vec<UnreadMeterRecord>, UnreadParseStats) {
    let mut records = Vec::new();
    let mut stats = UnreadParseStats::default();

    for row in grid {
        stats.total_rows += 1;

        // Linha de cabeçalho repetida no corpo do relatório
        let reason_text = cell_at(row, UNREAD_LAYOUT.reason).as_text();
        if reason_text.trim().eq_ignore_ascii_case(UNREAD_HEADER_MARKER) {
            stats.header_rows_skipped += 1;
            continue;
        }

        let ul = cell_at(row, UNREAD_LAYOUT.ul).as_text().trim().to_string();
        let installation = cell_at(row, UNREAD_LAYOUT.installation)
            .as_text()
            .trim()
            .to_string();
        let due_date = cell_at(row, UNREAD_LAYOUT.due_date)
            .as_text()
            .trim()
            .to_string();

        // Os três campos obrigatórios são avaliados de forma
        // independente para que as contagens reflitam cada falha
        let mut valid = true;
        if !UL_RE.is_match(&ul) {
            stats.missing_ul += 1;
            valid = false;
        }
        if !INSTALLATION_RE.is_match(&installation) {
            stats.missing_installation += 1;
            valid = false;
        }
        if !DUE_DATE_RE.is_match(&due_date) {
            stats.missing_due_date += 1;
            valid = false;
        }
        if !valid {
            debug!(ul = %ul, "Linha descartada por falha de validação");
            continue;
        }

        let reason_code = normalize_reason(&reason_text);

        let address_text = cell_at(row, UNREAD_LAYOUT.address).as_text();
        let address = if address_text.trim().is_empty() {
            None
        } else {
            Some(address_text.trim().to_string())
        };

        records.push(UnreadMeterRecord {
            ul,
            installation,
            due_date,
            reason_code,
            address,
        });
        stats.valid_rows += 1;
    }

    info!(
        total = stats.total_rows,
        validos = stats.valid_rows,
        descartados = stats.dropped_rows(),
        cabecalhos = stats.header_rows_skipped,
        "Parsing de não leitura concluído"
    );

    (records, stats)
}

/// Normaliza o motivo: em branco → padrão; um dígito → zero à esquerda
fn normalize_reason(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_REASON.to_string()
    } else if trimmed.len() == 1 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::Cell;

    /// Monta uma linha posicional com os campos nas colunas do layout
    fn build_row(ul: &str, installation: &str, reason: &str, address: &str, due: &str) -> Vec<Cell> {
        let mut row = vec![Cell::Empty; 27];
        row[UNREAD_LAYOUT.ul] = to_cell(ul);
        row[UNREAD_LAYOUT.installation] = to_cell(installation);
        row[UNREAD_LAYOUT.reason] = to_cell(reason);
        row[UNREAD_LAYOUT.address] = to_cell(address);
        row[UNREAD_LAYOUT.due_date] = to_cell(due);
        row
    }

    fn to_cell(v: &str) -> Cell {
        if v.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(v.to_string())
        }
    }

    #[test]
    fn test_parse_valid_row() {
        let grid = vec![build_row(
            "03520101",
            "0012345678",
            "05",
            "Rua das Acácias, 10",
            "15/08/2026",
        )];

        let (records, stats) = parse_unread_grid(&grid);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ul, "03520101");
        assert_eq!(records[0].installation, "0012345678");
        assert_eq!(records[0].due_date, "15/08/2026");
        assert_eq!(records[0].reason_code, "05");
        assert_eq!(records[0].address.as_deref(), Some("Rua das Acácias, 10"));
        assert_eq!(stats.valid_rows, 1);
    }

    #[test]
    fn test_reason_defaults_when_blank() {
        let grid = vec![build_row("03520101", "0012345678", "", "", "15/08/2026")];

        let (records, _) = parse_unread_grid(&grid);
        assert_eq!(records[0].reason_code, "03");
    }

    #[test]
    fn test_reason_zero_padded() {
        let grid = vec![build_row("03520101", "0012345678", "7", "", "15/08/2026")];

        let (records, _) = parse_unread_grid(&grid);
        assert_eq!(records[0].reason_code, "07");
    }

    #[test]
    fn test_header_row_skipped_case_insensitive() {
        let grid = vec![
            build_row("UL", "Instalação", "REG.", "Endereço", "Data Limite"),
            build_row("03520101", "0012345678", "03", "", "15/08/2026"),
        ];

        let (records, stats) = parse_unread_grid(&grid);

        assert_eq!(records.len(), 1);
        assert_eq!(stats.header_rows_skipped, 1);
    }

    #[test]
    fn test_invalid_ul_dropped() {
        let grid = vec![
            build_row("1234567", "0012345678", "03", "", "15/08/2026"), // 7 dígitos
            build_row("1234567X", "0012345678", "03", "", "15/08/2026"), // não numérica
            build_row("03520101", "0012345678", "03", "", "15/08/2026"),
        ];

        let (records, stats) = parse_unread_grid(&grid);

        assert_eq!(records.len(), 1);
        assert_eq!(stats.missing_ul, 2);
        assert!(records.iter().all(|r| UL_RE.is_match(&r.ul)));
    }

    #[test]
    fn test_invalid_due_date_dropped() {
        let grid = vec![
            build_row("03520101", "0012345678", "03", "", "2026-08-15"),
            build_row("03520101", "0012345678", "03", "", "15/8/2026"),
        ];

        let (records, stats) = parse_unread_grid(&grid);

        assert!(records.is_empty());
        assert_eq!(stats.missing_due_date, 2);
    }

    #[test]
    fn test_multiple_failures_counted_independently() {
        let grid = vec![build_row("", "", "03", "", "")];

        let (records, stats) = parse_unread_grid(&grid);

        assert!(records.is_empty());
        assert_eq!(stats.missing_ul, 1);
        assert_eq!(stats.missing_installation, 1);
        assert_eq!(stats.missing_due_date, 1);
        assert_eq!(stats.dropped_rows(), 1);
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let grid = vec![
            build_row("03520101", "0012345678", "03", "", "15/08/2026"),
            build_row("ruim", "0012345678", "03", "", "15/08/2026"),
        ];

        let (records, stats) = parse_unread_grid(&grid);
        assert!(records.len() <= grid.len());
        assert_eq!(stats.total_rows, grid.len());
    }

    #[test]
    fn test_empty_grid_is_valid_result() {
        let (records, stats) = parse_unread_grid(&Vec::new());
        assert!(records.is_empty());
        assert_eq!(stats, UnreadParseStats::default());
    }
}
