// ==========================================
// Gestão de Leitura - Agregador e Tabela de Abertura
// ==========================================
// Soma registros de resultado de leitura por chave composta,
// deriva percentuais com divisão segura e monta a tabela de
// abertura (data limite × pendências × atraso) por faixa
// ==========================================

use crate::domain::reading::{AggregatedReadingResult, GroupKey, ReadingResultRecord};
use crate::lookup::calendar::CalendarCache;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Quantidade de faixas (códigos de motivo) da tabela de abertura
pub const REASON_CODE_COUNT: u8 = 18;

/// Percentual de não executadas com divisão segura:
/// 0.0 quando previstas não é positiva; nunca NaN/infinito
pub fn safe_percent(not_executed: f64, planned: f64) -> f64 {
    if planned <= 0.0 {
        return 0.0;
    }
    let percent = not_executed / planned * 100.0;
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

/// Agrega registros por chave composta, somando as cinco
/// contagens entre chaves duplicadas.
///
/// A ordem de saída é a de primeira ocorrência de cada chave,
/// o que torna o resultado determinístico para a mesma entrada.
pub fn aggregate_reading_results(records: &[ReadingResultRecord]) -> Vec<AggregatedReadingResult> {
    let mut order: HashMap<GroupKey, usize> = HashMap::new();
    let mut aggregated: Vec<AggregatedReadingResult> = Vec::new();

    for record in records {
        let key = record.group_key();
        match order.get(&key) {
            Some(&idx) => {
                let agg = &mut aggregated[idx];
                agg.planned_count += record.planned_count;
                agg.not_executed_count += record.not_executed_count;
                agg.reread_total += record.reread_total;
                agg.reread_not_executed += record.reread_not_executed;
                agg.impediments_count += record.impediments_count;
            }
            None => {
                order.insert(key.clone(), aggregated.len());
                aggregated.push(AggregatedReadingResult {
                    key,
                    planned_count: record.planned_count,
                    not_executed_count: record.not_executed_count,
                    reread_total: record.reread_total,
                    reread_not_executed: record.reread_not_executed,
                    impediments_count: record.impediments_count,
                    percent_not_executed: 0.0,
                });
            }
        }
    }

    for agg in &mut aggregated {
        agg.percent_not_executed = safe_percent(agg.not_executed_count, agg.planned_count);
    }

    debug!(
        registros = records.len(),
        grupos = aggregated.len(),
        "Agregação por chave composta concluída"
    );

    aggregated
}

/// Pendências por faixa (1-18): soma das não executadas dos
/// agregados cujo motivo cai na faixa esperada
pub fn pending_by_reason(aggregated: &[AggregatedReadingResult]) -> HashMap<u8, f64> {
    let mut pending = HashMap::new();

    for agg in aggregated {
        if let Ok(reason) = agg.key.reason_code.parse::<u8>() {
            if (1..=REASON_CODE_COUNT).contains(&reason) {
                *pending.entry(reason).or_insert(0.0) += agg.not_executed_count;
            }
        }
    }

    pending
}

// ==========================================
// AberturaCell - célula da tabela de abertura
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AberturaCell {
    pub pending_quantity: f64,         // Pendências da faixa no mês
    pub due_date: Option<NaiveDate>,   // Data de referência do calendário
    pub atraso: u8,                    // 1 = atrasada, 0 = em dia
}

// ==========================================
// AberturaTable - 18 faixas de um (ano, mês)
// ==========================================
// Distinção obrigatória: célula None quando o mês não tem
// dado algum; 0 literal quando o mês tem dados mas a faixa
// específica está zerada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AberturaTable {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<AberturaCell>>, // Índice 0 = faixa 01
}

impl AberturaTable {
    /// Célula da faixa (1-18)
    pub fn cell(&self, reason: u8) -> Option<&AberturaCell> {
        if reason == 0 {
            return None;
        }
        self.cells.get((reason - 1) as usize)?.as_ref()
    }
}

/// Monta a tabela de abertura de um (ano, mês).
///
/// Data limite desconhecida com pendência positiva conta como
/// atraso: tratar como atrasada evita mascarar trabalho pendente.
pub fn build_abertura_table(
    pending: &HashMap<u8, f64>,
    calendar: &CalendarCache,
    calendar_path: Option<&Path>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> AberturaTable {
    let total: f64 = pending.values().sum();

    // Mês sem dado algum: todas as células None, nunca 0
    if total <= 0.0 {
        return AberturaTable {
            year,
            month,
            cells: vec![None; REASON_CODE_COUNT as usize],
        };
    }

    let mut cells = Vec::with_capacity(REASON_CODE_COUNT as usize);
    for reason in 1..=REASON_CODE_COUNT {
        let quantity = pending.get(&reason).copied().unwrap_or(0.0);
        let due_date =
            calendar_path.and_then(|path| calendar.lookup(path, year, month, reason));

        let atraso = if quantity > 0.0 {
            match due_date {
                Some(due) => u8::from(today > due),
                None => 1, // Data desconhecida: trata como atrasada
            }
        } else {
            0
        };

        cells.push(Some(AberturaCell {
            pending_quantity: quantity,
            due_date,
            atraso,
        }));
    }

    AberturaTable { year, month, cells }
}
