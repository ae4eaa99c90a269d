// ==========================================
// Gestão de Leitura - Calendário de Faixas
// ==========================================
// Planilha de datas de referência por (ano, mês, faixa 1-18),
// usada para apurar datas limite e atraso na tabela de abertura
// ==========================================
// Único estado compartilhado entre chamadas do núcleo: o mapa
// materializado fica em cache chaveado por (caminho, mtime) e
// protegido por Mutex, pois verificar-e-recarregar não é
// atômico sob threads concorrentes de atendimento
// ==========================================

use crate::domain::reference::CalendarKey;
use crate::importer::file_parser::{cell_at, parse_grid, Cell, RawDocument};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Calendário materializado de um arquivo específico
struct LoadedCalendar {
    path: PathBuf,
    mtime: SystemTime,
    map: HashMap<CalendarKey, NaiveDate>,
}

// ==========================================
// CalendarCache - cache por (caminho, mtime)
// ==========================================
// Ciclo de vida: criado uma vez no estado do processo
// hospedeiro; invalida e recarrega sozinho quando o mtime
// do arquivo muda; invalidate() força recarga na próxima
// consulta
pub struct CalendarCache {
    inner: Mutex<Option<LoadedCalendar>>,
}

impl CalendarCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Data de referência para (ano, mês, faixa).
    ///
    /// Arquivo ausente ou ilegível degrada para None;
    /// faixa sem data no calendário também é None.
    pub fn lookup<P: AsRef<Path>>(
        &self,
        path: P,
        year: i32,
        month: u32,
        reason: u8,
    ) -> Option<NaiveDate> {
        let path = path.as_ref();

        let mtime = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(_) => {
                // Arquivo sumiu: descarta o cache para recarregar
                // quando voltar a existir
                *self.lock() = None;
                return None;
            }
        };

        let mut guard = self.lock();

        let stale = match guard.as_ref() {
            Some(loaded) => loaded.path != path || loaded.mtime != mtime,
            None => true,
        };

        if stale {
            debug!(arquivo = %path.display(), "Recarregando calendário de faixas");
            *guard = Some(LoadedCalendar {
                path: path.to_path_buf(),
                mtime,
                map: load_calendar_map(path),
            });
        }

        let key = CalendarKey {
            year,
            month,
            reason,
        };
        guard.as_ref().and_then(|loaded| loaded.map.get(&key).copied())
    }

    /// Descarta o calendário em cache; a próxima consulta recarrega
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<LoadedCalendar>> {
        // Lock envenenado só ocorre com pânico em outra thread;
        // o conteúdo é um cache e pode ser reutilizado
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CalendarCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Materializa o mapa (ano, mês, faixa) → data do arquivo
fn load_calendar_map(path: &Path) -> HashMap<CalendarKey, NaiveDate> {
    let mut map = HashMap::new();

    let grid = match RawDocument::from_path(path).and_then(|doc| parse_grid(&doc)) {
        Ok(grid) => grid,
        Err(e) => {
            warn!(arquivo = %path.display(), erro = %e, "Falha ao ler calendário de faixas");
            return map;
        }
    };

    let Some(header) = grid.first() else {
        return map;
    };

    let Some(columns) = discover_calendar_columns(header) else {
        warn!(arquivo = %path.display(), "Cabeçalho do calendário sem as colunas esperadas");
        return map;
    };

    for row in grid.iter().skip(1) {
        let Some(year) = cell_at(row, columns.year).as_number() else {
            continue;
        };
        let Some(month) = cell_at(row, columns.month).as_number() else {
            continue;
        };
        let Some(reason) = cell_at(row, columns.reason).as_number() else {
            continue;
        };

        let date_text = cell_at(row, columns.date).as_text();
        let Ok(date) = NaiveDate::parse_from_str(date_text.trim(), "%d/%m/%Y") else {
            continue;
        };

        map.insert(
            CalendarKey {
                year: year as i32,
                month: month as u32,
                reason: reason as u8,
            },
            date,
        );
    }

    debug!(entradas = map.len(), "Calendário de faixas materializado");
    map
}

struct CalendarColumns {
    year: usize,
    month: usize,
    reason: usize,
    date: usize,
}

/// Descoberta de colunas por nome (minúsculas, com e sem acento)
fn discover_calendar_columns(header: &[Cell]) -> Option<CalendarColumns> {
    let mut year = None;
    let mut month = None;
    let mut reason = None;
    let mut date = None;

    for (idx, cell) in header.iter().enumerate() {
        let name = cell.as_text().to_lowercase();
        if name.is_empty() {
            continue;
        }

        if year.is_none() && name.contains("ano") {
            year = Some(idx);
        } else if month.is_none() && (name.contains("mes") || name.contains("mês")) {
            month = Some(idx);
        } else if reason.is_none() && (name.contains("faixa") || name.contains("motivo")) {
            reason = Some(idx);
        } else if date.is_none() && name.contains("data") {
            date = Some(idx);
        }
    }

    Some(CalendarColumns {
        year: year?,
        month: month?,
        reason: reason?,
        date: date?,
    })
}
