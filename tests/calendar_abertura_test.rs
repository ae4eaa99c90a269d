// ==========================================
// Gestão de Leitura - Teste do Calendário e Abertura
// ==========================================
// Cache por (caminho, mtime) do calendário de faixas e
// montagem da tabela de abertura com apuração de atraso
// ==========================================

use chrono::NaiveDate;
use gestor_leitura::{build_abertura_table, CalendarCache};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// Calendário de agosto/2026 com datas para as faixas 01-04
fn create_calendar_csv() -> NamedTempFile {
    let mut temp = NamedTempFile::new().expect("fixture temporária");
    writeln!(temp, "Ano,Mes,Faixa,Data").unwrap();
    writeln!(temp, "2026,8,1,03/08/2026").unwrap();
    writeln!(temp, "2026,8,2,05/08/2026").unwrap();
    writeln!(temp, "2026,8,3,12/08/2026").unwrap();
    writeln!(temp, "2026,8,4,20/08/2026").unwrap();
    temp.flush().unwrap();
    temp
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_abertura_with_calendar_dates() {
    let calendar_file = create_calendar_csv();
    let calendar = CalendarCache::new();

    let mut pending = HashMap::new();
    pending.insert(1u8, 4.0); // Data 03/08: já passou → atraso
    pending.insert(3u8, 2.0); // Data 12/08: ainda no prazo
    pending.insert(5u8, 1.0); // Sem data no calendário → atraso

    let today = date(2026, 8, 6);
    let table = build_abertura_table(
        &pending,
        &calendar,
        Some(calendar_file.path()),
        2026,
        8,
        today,
    );

    let cell_01 = table.cell(1).unwrap();
    assert_eq!(cell_01.due_date, Some(date(2026, 8, 3)));
    assert_eq!(cell_01.atraso, 1);

    let cell_03 = table.cell(3).unwrap();
    assert_eq!(cell_03.due_date, Some(date(2026, 8, 12)));
    assert_eq!(cell_03.atraso, 0);

    // Data desconhecida com pendência positiva conta como atraso
    let cell_05 = table.cell(5).unwrap();
    assert_eq!(cell_05.due_date, None);
    assert_eq!(cell_05.atraso, 1);

    // Faixa com data mas sem pendência: 0 literal, sem atraso
    let cell_02 = table.cell(2).unwrap();
    assert_eq!(cell_02.pending_quantity, 0.0);
    assert_eq!(cell_02.atraso, 0);
}

#[test]
fn test_abertura_due_date_on_today_is_not_late() {
    let calendar_file = create_calendar_csv();
    let calendar = CalendarCache::new();

    let mut pending = HashMap::new();
    pending.insert(3u8, 2.0);

    // Hoje é exatamente a data limite: ainda no prazo
    let table = build_abertura_table(
        &pending,
        &calendar,
        Some(calendar_file.path()),
        2026,
        8,
        date(2026, 8, 12),
    );

    assert_eq!(table.cell(3).unwrap().atraso, 0);
}

#[test]
fn test_abertura_month_without_data_is_all_none() {
    let calendar_file = create_calendar_csv();
    let calendar = CalendarCache::new();

    let table = build_abertura_table(
        &HashMap::new(),
        &calendar,
        Some(calendar_file.path()),
        2026,
        8,
        date(2026, 8, 6),
    );

    // Nenhuma pendência no mês: toda célula é None, nunca 0
    assert_eq!(table.cells.len(), 18);
    assert!(table.cells.iter().all(Option::is_none));
}

#[test]
fn test_calendar_cache_survives_repeated_lookups() {
    let calendar_file = create_calendar_csv();
    let calendar = CalendarCache::new();

    // Consultas repetidas no mesmo (caminho, mtime) usam o cache
    for _ in 0..3 {
        assert_eq!(
            calendar.lookup(calendar_file.path(), 2026, 8, 3),
            Some(date(2026, 8, 12))
        );
    }

    // Faixa fora do calendário segue None
    assert_eq!(calendar.lookup(calendar_file.path(), 2026, 8, 18), None);
}

#[test]
fn test_calendar_reload_after_file_change() {
    let calendar_file = create_calendar_csv();
    let calendar = CalendarCache::new();

    assert_eq!(
        calendar.lookup(calendar_file.path(), 2026, 8, 3),
        Some(date(2026, 8, 12))
    );

    // Regrava a faixa 3 com outra data e força um mtime distinto
    std::fs::write(calendar_file.path(), "Ano,Mes,Faixa,Data\n2026,8,3,25/08/2026\n").unwrap();
    let file = std::fs::File::options()
        .write(true)
        .open(calendar_file.path())
        .unwrap();
    file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(5))
        .unwrap();

    assert_eq!(
        calendar.lookup(calendar_file.path(), 2026, 8, 3),
        Some(date(2026, 8, 25))
    );
}
