// ==========================================
// Gestão de Leitura - Teste do Fragmento SQL de Ciclo
// ==========================================
// O predicado em memória e o fragmento WHERE gerado devem
// concordar para todo sufixo e todo seletor; verificação
// contra SQLite em memória
// ==========================================

use gestor_leitura::CycleFilter;
use rusqlite::Connection;

/// Banco em memória com uma UL por sufixo 01-99
fn setup_readings_db() -> Connection {
    let conn = Connection::open_in_memory().expect("sqlite em memória");
    conn.execute(
        "CREATE TABLE leitura_resultado (ul TEXT NOT NULL)",
        [],
    )
    .unwrap();

    for suffix in 1..=99u8 {
        let ul = format!("032010{:02}", suffix);
        conn.execute("INSERT INTO leitura_resultado (ul) VALUES (?1)", [&ul])
            .unwrap();
    }

    conn
}

/// Sufixos que sobrevivem ao fragmento SQL do filtro
fn sql_suffixes(conn: &Connection, filter: &CycleFilter) -> Vec<u8> {
    let fragment = match filter.sql_fragment("ul") {
        Some(f) => f,
        None => "1=1".to_string(),
    };

    let sql = format!(
        "SELECT ul FROM leitura_resultado WHERE {} ORDER BY ul",
        fragment
    );
    let mut stmt = conn.prepare(&sql).expect("fragmento válido");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();

    rows.iter().map(|ul| ul[6..8].parse().unwrap()).collect()
}

/// Sufixos que sobrevivem ao predicado em memória
fn predicate_suffixes(filter: &CycleFilter) -> Vec<u8> {
    (1..=99u8).filter(|s| filter.allows_suffix(*s)).collect()
}

#[test]
fn test_sql_fragment_matches_predicate_for_every_cycle() {
    let conn = setup_readings_db();

    for selector in [Some("97"), Some("98"), Some("99"), Some("42"), None] {
        let filter = CycleFilter::from_selector(selector);
        assert_eq!(
            sql_suffixes(&conn, &filter),
            predicate_suffixes(&filter),
            "divergência no seletor {:?}",
            selector
        );
    }
}

#[test]
fn test_sql_fragment_cycle_97_scenario() {
    let conn = setup_readings_db();
    let filter = CycleFilter::from_selector(Some("97"));

    let survivors = sql_suffixes(&conn, &filter);

    assert!(survivors.contains(&90)); // Par do ciclo 97
    assert!(!survivors.contains(&92)); // Par do ciclo 98
    assert!(survivors.contains(&50)); // Faixa base sempre passa
    assert!(survivors.contains(&96)); // Sempre permitido
    assert!(survivors.contains(&97)); // O próprio ciclo
}

#[test]
fn test_no_selector_keeps_every_row() {
    let conn = setup_readings_db();
    let filter = CycleFilter::from_selector(None);

    assert_eq!(sql_suffixes(&conn, &filter).len(), 99);
}
