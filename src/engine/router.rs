// ==========================================
// Gestão de Leitura - Roteador Regional (V2)
// ==========================================
// Atribui região a registros de não leitura já validados:
// mapa de referência primeiro, tabela estática de regiões
// conhecidas como retaguarda. Totalidade garantida: cada
// registro de entrada vira exatamente um registro de saída,
// roteado ou não — UNROUTED é desfecho normal
// ==========================================

use crate::domain::types::RouteStatus;
use crate::domain::unread::{RoutedUnreadMeterRecord, UnreadMeterRecord};
use crate::domain::ReferenceMap;
use crate::lookup::reference_map::load_reference_map;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Variável de ambiente que sobrepõe a descoberta do arquivo
/// de referência
pub const REFERENCE_PATH_ENV: &str = "REFERENCIA_UL_PATH";

/// Caminhos relativos candidatos, na ordem de tentativa
const REFERENCE_CANDIDATES: [&str; 4] = [
    "dados/referencia_ul.xlsx",
    "dados/referencia_ul.xls",
    "dados/referencia_ul.csv",
    "referencia_ul.xlsx",
];

/// Retaguarda estática: códigos regionais conhecidos → região.
/// Usada quando o mapa de referência não resolve o código
/// (arquivo ausente, desatualizado ou incompleto).
const STATIC_REGION_TABLE: [(&str, &str); 24] = [
    ("2010", "Uberaba"),
    ("2011", "Uberaba"),
    ("2012", "Uberaba"),
    ("2013", "Uberaba"),
    ("2020", "Uberlândia"),
    ("2021", "Uberlândia"),
    ("2022", "Uberlândia"),
    ("2023", "Uberlândia"),
    ("2030", "Araxá"),
    ("2031", "Araxá"),
    ("2032", "Araxá"),
    ("2040", "Patos de Minas"),
    ("2041", "Patos de Minas"),
    ("2042", "Patos de Minas"),
    ("2050", "Ituiutaba"),
    ("2051", "Ituiutaba"),
    ("2060", "Frutal"),
    ("2061", "Frutal"),
    ("2070", "Patrocínio"),
    ("2071", "Patrocínio"),
    ("2080", "Monte Carmelo"),
    ("2081", "Monte Carmelo"),
    ("2090", "Iturama"),
    ("2091", "Iturama"),
];

/// Resolve o caminho do arquivo de referência:
/// sobreposição explícita → variável de ambiente → candidatos
/// fixos; o primeiro existente vence. None significa operar só
/// com a retaguarda estática.
pub fn discover_reference_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(env_path) = std::env::var(REFERENCE_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Some(path);
        }
    }

    for candidate in REFERENCE_CANDIDATES {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Roteia os registros descobrindo e carregando o mapa de
/// referência (retaguarda estática quando nenhum arquivo existe)
pub fn route_with_discovery(
    records: &[UnreadMeterRecord],
    override_path: Option<&Path>,
) -> Vec<RoutedUnreadMeterRecord> {
    let reference = match discover_reference_path(override_path) {
        Some(path) => {
            debug!(arquivo = %path.display(), "Arquivo de referência descoberto");
            load_reference_map(path)
        }
        None => {
            info!("Nenhum arquivo de referência; roteando só com a tabela estática");
            ReferenceMap::new()
        }
    };

    route_records(records, &reference)
}

/// Roteia os registros contra um mapa de referência já carregado
pub fn route_records(
    records: &[UnreadMeterRecord],
    reference: &ReferenceMap,
) -> Vec<RoutedUnreadMeterRecord> {
    let routed: Vec<RoutedUnreadMeterRecord> =
        records.iter().map(|r| route_one(r, reference)).collect();

    let unrouted = routed
        .iter()
        .filter(|r| r.route_status == RouteStatus::Unrouted)
        .count();
    info!(
        total = routed.len(),
        nao_roteados = unrouted,
        "Roteamento regional concluído"
    );

    routed
}

/// Resolução por registro, na ordem: validação da UL →
/// mapa de referência → tabela estática → UNROUTED
fn route_one(record: &UnreadMeterRecord, reference: &ReferenceMap) -> RoutedUnreadMeterRecord {
    // (a) UL precisa ter exatamente 8 dígitos
    if record.ul.len() != 8 || !record.ul.chars().all(|c| c.is_ascii_digit()) {
        return RoutedUnreadMeterRecord {
            record: record.clone(),
            regional_code: String::new(),
            locality: None,
            region: None,
            route_status: RouteStatus::Unrouted,
            route_reason: Some("UL inválida".to_string()),
        };
    }

    let regional_code = format!("{:0>4}", &record.ul[2..6]);

    // (b) Mapa de referência
    if let Some(entry) = reference.get(&regional_code) {
        if !entry.region.is_empty() {
            return RoutedUnreadMeterRecord {
                record: record.clone(),
                regional_code,
                locality: non_empty(&entry.locality),
                region: Some(entry.region.clone()),
                route_status: RouteStatus::Routed,
                route_reason: None,
            };
        }
    }

    // (c) Retaguarda estática
    if let Some((_, region)) = STATIC_REGION_TABLE
        .iter()
        .find(|(code, _)| *code == regional_code)
    {
        return RoutedUnreadMeterRecord {
            record: record.clone(),
            regional_code,
            locality: None,
            region: Some(region.to_string()),
            route_status: RouteStatus::Routed,
            route_reason: None,
        };
    }

    // (d) Sem resolução: desfecho normal, com motivo legível
    RoutedUnreadMeterRecord {
        record: record.clone(),
        regional_code: regional_code.clone(),
        locality: None,
        region: None,
        route_status: RouteStatus::Unrouted,
        route_reason: Some(format!(
            "Código regional {} sem região conhecida",
            regional_code
        )),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}
