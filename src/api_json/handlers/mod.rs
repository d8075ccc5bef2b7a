pub mod auditoria;
pub mod banners;
pub mod catalogo;
pub mod cursos;
pub mod depoimentos;
pub mod docs;
pub mod leads;

pub use auditoria::*;
pub use banners::*;
pub use catalogo::*;
pub use cursos::*;
pub use depoimentos::*;
pub use docs::*;
pub use leads::*;

use actix_web::HttpRequest;

/// Autor das mutações administrativas, lido do cabeçalho `X-Admin-User`
/// quando o painel o envia (a autenticação em si fica no serviço hospedado).
pub(crate) fn autor_do_request(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("X-Admin-User")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
