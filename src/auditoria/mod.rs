// Log de auditoria do painel administrativo: cada mutação (curso, banner,
// moderação de depoimento) registra quem fez, o que mudou e os instantâneos
// JSON de antes e depois. O registro é melhor-esforço: uma falha aqui nunca
// derruba a mutação que a originou.

pub mod db;
pub mod diff;

pub use db::{init_db, listar_eventos, obter_evento, registrar_evento};
pub use diff::{diff_campos, CampoAlterado};
