// ==========================================
// Gestão de Leitura - Mapa de Referência Geográfica
// ==========================================
// Planilha auxiliar: código regional (4 caracteres) →
// localidade / supervisão / região. Descoberta de colunas
// por nome, tolerante a variações de acento e abreviação
// ==========================================
// Sem cache nesta camada: o mapa é recarregado a cada
// invocação de parsing/roteamento; o único cache entre
// chamadas pertence ao calendário (lookup/calendar.rs)
// ==========================================

use crate::domain::reference::{ReferenceEntry, ReferenceMap};
use crate::importer::file_parser::{cell_at, parse_grid, RawDocument, SheetGrid};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Índices das colunas descobertas no cabeçalho
#[derive(Debug, Default)]
struct DiscoveredColumns {
    code: Option<usize>,
    locality: Option<usize>,
    supervision: Option<usize>,
    region: Option<usize>,
}

/// Carrega o mapa de referência a partir da planilha.
///
/// Arquivo ausente ou ilegível degrada para mapa vazio,
/// nunca para erro: a ausência de referência é um estado
/// operacional previsto (sentinelas a jusante).
pub fn load_reference_map<P: AsRef<Path>>(path: P) -> ReferenceMap {
    let path = path.as_ref();

    if !path.exists() {
        warn!(arquivo = %path.display(), "Planilha de referência ausente; mapa vazio");
        return HashMap::new();
    }

    let doc = match RawDocument::from_path(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(arquivo = %path.display(), erro = %e, "Falha ao abrir planilha de referência");
            return HashMap::new();
        }
    };

    let grid = match parse_grid(&doc) {
        Ok(grid) => grid,
        Err(e) => {
            warn!(arquivo = %path.display(), erro = %e, "Falha ao ler planilha de referência");
            return HashMap::new();
        }
    };

    build_reference_map(&grid)
}

/// Constrói o mapa a partir de uma grade já aberta
pub fn build_reference_map(grid: &SheetGrid) -> ReferenceMap {
    let mut map = HashMap::new();

    let Some(header) = grid.first() else {
        return map;
    };

    let columns = discover_columns(header);
    let Some(code_col) = columns.code else {
        warn!("Coluna de UL não encontrada no cabeçalho da referência");
        return map;
    };

    for row in grid.iter().skip(1) {
        let raw_code = cell_at(row, code_col).as_text();
        let raw_code = raw_code.trim();
        if raw_code.is_empty() {
            continue;
        }

        let regional_code = derive_regional_code(raw_code);

        let entry = ReferenceEntry {
            locality: text_at(row, columns.locality),
            supervision: text_at(row, columns.supervision),
            region: text_at(row, columns.region),
        };
        map.insert(regional_code, entry);
    }

    debug!(entradas = map.len(), "Mapa de referência carregado");
    map
}

/// Descobre as colunas pelo cabeçalho (comparação em minúsculas,
/// aceitando variantes com e sem acento)
fn discover_columns(header: &[crate::importer::file_parser::Cell]) -> DiscoveredColumns {
    let mut columns = DiscoveredColumns::default();

    for (idx, cell) in header.iter().enumerate() {
        let name = cell.as_text().to_lowercase();
        if name.is_empty() {
            continue;
        }

        if columns.code.is_none() && name.contains("ul") {
            columns.code = Some(idx);
        } else if columns.locality.is_none()
            && (name.contains("localidade") || name.contains("local"))
        {
            columns.locality = Some(idx);
        } else if columns.supervision.is_none()
            && (name.contains("supervisao") || name.contains("supervisão"))
        {
            columns.supervision = Some(idx);
        } else if columns.region.is_none() && (name.contains("regiao") || name.contains("região")) {
            columns.region = Some(idx);
        }
    }

    columns
}

/// Deriva o código regional de 4 caracteres do valor bruto de UL:
/// - 8 caracteres → posições [2..6]
/// - 6 ou 7 caracteres → últimos 4
/// - menos de 6 → preenchido com zeros à esquerda até 4
pub fn derive_regional_code(raw: &str) -> String {
    let chars: Vec<char> = raw.trim().chars().collect();
    if chars.len() >= 6 {
        if chars.len() == 8 {
            chars[2..6].iter().collect()
        } else {
            chars[chars.len() - 4..].iter().collect()
        }
    } else {
        format!("{:0>4}", raw.trim())
    }
}

fn text_at(row: &[crate::importer::file_parser::Cell], index: Option<usize>) -> String {
    match index {
        Some(idx) => cell_at(row, idx).as_text().trim().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::Cell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(v.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_derive_regional_code() {
        assert_eq!(derive_regional_code("03201001"), "2010"); // 8 chars: [2..6]
        assert_eq!(derive_regional_code("3201001"), "1001"); // 7 chars: últimos 4
        assert_eq!(derive_regional_code("201001"), "1001"); // 6 chars: últimos 4
        assert_eq!(derive_regional_code("201"), "0201"); // < 6: zeros à esquerda
        assert_eq!(derive_regional_code("12"), "0012");
    }

    #[test]
    fn test_build_map_with_name_discovery() {
        let grid = vec![
            text_row(&["UL", "Localidade", "Supervisão", "Região"]),
            text_row(&["03201001", "Conceição das Alagoas", "Sup Uberaba", "Uberaba"]),
            text_row(&["03202201", "Sacramento", "Sup Uberaba", "Uberaba"]),
        ];

        let map = build_reference_map(&grid);

        assert_eq!(map.len(), 2);
        let entry = map.get("2010").unwrap();
        assert_eq!(entry.locality, "Conceição das Alagoas");
        assert_eq!(entry.region, "Uberaba");
        assert!(map.contains_key("2022"));
    }

    #[test]
    fn test_header_variants_without_accent() {
        let grid = vec![
            text_row(&["Cod UL", "Local", "Supervisao", "Regiao"]),
            text_row(&["03201001", "Delta", "Sup A", "Uberaba"]),
        ];

        let map = build_reference_map(&grid);
        assert_eq!(map.get("2010").unwrap().supervision, "Sup A");
    }

    #[test]
    fn test_missing_code_column_yields_empty_map() {
        let grid = vec![
            text_row(&["Localidade", "Região"]),
            text_row(&["Delta", "Uberaba"]),
        ];

        assert!(build_reference_map(&grid).is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_map() {
        let map = load_reference_map("nao_existe_referencia.xlsx");
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_from_csv_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "UL,Localidade,Supervisao,Regiao").unwrap();
        writeln!(temp, "03201001,Conceição das Alagoas,Sup Uberaba,Uberaba").unwrap();

        let map = load_reference_map(temp.path());
        assert_eq!(map.get("2010").unwrap().region, "Uberaba");
    }
}
