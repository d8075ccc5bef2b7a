use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::LeadInput;

/// GET /help — resumo de uso da API com exemplos.
pub async fn help_handler() -> impl Responder {
    let exemplo_lead = LeadInput {
        nome: "Maria Souza".to_string(),
        email: "maria@example.com".to_string(),
        telefone: Some("11 98888-0000".to_string()),
        curso_interesse: Some("Cabeleireiro Profissional".to_string()),
        mensagem: Some("Quero saber os horários da turma da noite".to_string()),
    };

    let help = json!({
        "description": "API do site da escola: catálogo de cursos com filtro/busca/paginação, banners do carrossel, captação de leads, depoimentos e auditoria do painel.",
        "catalogo_example_query": "/catalogo?tipo=ead&busca=cabelo&pagina=1",
        "catalogo_tipos": ["all", "presencial", "ead"],
        "lead_post_example": exemplo_lead,
        "admin_note": "As rotas /admin/* registram auditoria; envie o cabeçalho X-Admin-User para identificar o autor.",
        "auditoria_diff_example": "/admin/auditoria/1/diff"
    });

    HttpResponse::Ok().json(help)
}
