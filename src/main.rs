// --- Vitrine - API do site da escola - Arquivo principal ---

use vitrine::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== Vitrine (API do catálogo de cursos) ===");

    if let Err(e) = vitrine::storage::db::init_db() {
        eprintln!("falha ao preparar o banco principal: {}", e);
    }
    if let Err(e) = vitrine::auditoria::db::init_db() {
        eprintln!("falha ao preparar o banco de auditoria: {}", e);
    }

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    println!("Iniciando servidor em http://{}", bind);
    run_server(&bind).await
}
