// ==========================================
// Inicialização do Sistema de Logs
// ==========================================
// Usa tracing e tracing-subscriber
// Nível configurável por variável de ambiente
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o sistema de logs
///
/// # Variáveis de ambiente
/// - RUST_LOG: filtro de nível (padrão: info)
///   Exemplos: RUST_LOG=debug ou RUST_LOG=gestor_leitura=trace
///
/// # Exemplo
/// ```no_run
/// use gestor_leitura::logging;
/// logging::init();
/// ```
pub fn init() {
    // Lê o nível da variável de ambiente, padrão info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Formato dos logs
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inicializa os logs no ambiente de teste
///
/// Nível mais detalhado para facilitar a depuração
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
