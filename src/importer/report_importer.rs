// ==========================================
// Gestão de Leitura - Importador de Relatórios
// ==========================================
// Orquestra o fluxo por documento: detecção do tipo de
// arquivo → grade → classificação → parser correspondente
// → resumo de importação. O núcleo de transformação segue
// síncrono; a camada assíncrona existe para a importação
// concorrente de múltiplos arquivos
// ==========================================

use crate::domain::reading::{AggregatedReadingResult, ReadingResultRecord};
use crate::domain::types::ReportType;
use crate::domain::unread::{UnreadMeterRecord, UnreadParseStats};
use crate::engine::aggregator::aggregate_reading_results;
use crate::engine::cycle::CycleFilter;
use crate::importer::classifier::classify_grid;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{parse_grid, RawDocument};
use crate::importer::gate_parser::parse_gate_grid;
use crate::importer::unread_parser::parse_unread_grid;
use crate::domain::ReferenceMap;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ImportOutcome - resumo de uma importação
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub batch_id: String,        // Lote (UUID v4)
    pub report_type: ReportType, // Tipo efetivamente processado
    pub diagnostic: String,      // Diagnóstico do classificador
    pub payload: ImportPayload,  // Registros produzidos
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportPayload {
    UnreadMeter {
        records: Vec<UnreadMeterRecord>,
        stats: UnreadParseStats,
    },
    GateResult {
        records: Vec<ReadingResultRecord>,
        aggregated: Vec<AggregatedReadingResult>,
    },
    /// Documento não identificado: nada produzido, quem chama
    /// decide abortar ou forçar um tipo
    None,
}

// ==========================================
// ReportImporter - interface de importação
// ==========================================
#[async_trait]
pub trait ReportImporter: Send + Sync {
    /// Importa um documento a partir dos bytes brutos
    async fn import_bytes(&self, bytes: Vec<u8>) -> ImportResult<ImportOutcome>;

    /// Importa um documento do disco
    async fn import_path(&self, path: PathBuf) -> ImportResult<ImportOutcome>;

    /// Importa vários arquivos de forma concorrente.
    ///
    /// Cada arquivo é independente: a falha de um não
    /// interrompe os demais.
    async fn batch_import(&self, paths: Vec<PathBuf>) -> Vec<Result<ImportOutcome, String>>;
}

// ==========================================
// ReportImporterImpl - implementação padrão
// ==========================================
pub struct ReportImporterImpl {
    reference: ReferenceMap,
    cycle_filter: Option<CycleFilter>,
    forced_type: Option<ReportType>,
}

impl ReportImporterImpl {
    /// Importador com mapa de referência e seletor de ciclo opcionais
    pub fn new(reference: ReferenceMap, cycle_selector: Option<&str>) -> Self {
        Self {
            reference,
            cycle_filter: cycle_selector.map(|s| CycleFilter::from_selector(Some(s))),
            forced_type: None,
        }
    }

    /// Força um tipo de relatório, ignorando a classificação.
    ///
    /// Divergência entre o tipo forçado e o classificado vira
    /// aviso consultivo; o parsing prossegue mesmo assim.
    pub fn with_forced_type(mut self, report_type: ReportType) -> Self {
        self.forced_type = Some(report_type);
        self
    }

    /// Fluxo síncrono por documento
    fn process_document(&self, doc: &RawDocument) -> ImportResult<ImportOutcome> {
        let batch_id = Uuid::new_v4().to_string();

        let grid = match parse_grid(doc) {
            Ok(grid) => grid,
            Err(e) => {
                // Documento ilegível: resultado vazio + diagnóstico,
                // nunca pânico nem aborto do processo
                warn!(batch_id = %batch_id, erro = %e, "Documento ilegível");
                return Ok(ImportOutcome {
                    batch_id,
                    report_type: ReportType::Unknown,
                    diagnostic: format!("Documento ilegível: {}", e),
                    payload: ImportPayload::None,
                });
            }
        };

        let (classified, diagnostic) = classify_grid(&grid);

        let effective = match self.forced_type {
            Some(forced) => {
                if forced != classified {
                    warn!(
                        batch_id = %batch_id,
                        classificado = %classified,
                        forcado = %forced,
                        "Tipo forçado diverge do classificado; prosseguindo"
                    );
                }
                forced
            }
            None => classified,
        };

        let payload = match effective {
            ReportType::UnreadMeter => {
                let (records, stats) = parse_unread_grid(&grid);
                ImportPayload::UnreadMeter { records, stats }
            }
            ReportType::GateResult => {
                let records =
                    parse_gate_grid(&grid, &self.reference, self.cycle_filter.as_ref());
                let aggregated = aggregate_reading_results(&records);
                ImportPayload::GateResult {
                    records,
                    aggregated,
                }
            }
            ReportType::Unknown => ImportPayload::None,
        };

        info!(
            batch_id = %batch_id,
            tipo = %effective,
            "Importação de documento concluída"
        );

        Ok(ImportOutcome {
            batch_id,
            report_type: effective,
            diagnostic,
            payload,
        })
    }
}

#[async_trait]
impl ReportImporter for ReportImporterImpl {
    #[instrument(skip(self, bytes))]
    async fn import_bytes(&self, bytes: Vec<u8>) -> ImportResult<ImportOutcome> {
        let doc = RawDocument::from_bytes(bytes);
        self.process_document(&doc)
    }

    #[instrument(skip(self))]
    async fn import_path(&self, path: PathBuf) -> ImportResult<ImportOutcome> {
        let doc = RawDocument::from_path(&path)?;
        self.process_document(&doc)
    }

    async fn batch_import(&self, paths: Vec<PathBuf>) -> Vec<Result<ImportOutcome, String>> {
        let futures = paths.into_iter().map(|path| async move {
            self.import_path(path.clone())
                .await
                .map_err(|e| format!("{}: {}", path.display(), e))
        });

        futures::future::join_all(futures).await
    }
}
