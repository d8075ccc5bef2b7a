// Biblioteca raiz do crate `vitrine`.
// Reexporta os módulos principais e a função de conveniência `run_server`
// que sobe a API do site de cursos.
pub mod api_json;
pub mod auditoria;
pub mod catalogo;
pub mod models;
pub mod server;
pub mod storage;

/// Executa o servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
