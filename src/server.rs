use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::api_json::handlers::{
    admin_listar_banners_handler, admin_listar_depoimentos_handler, atualizar_banner_handler,
    atualizar_curso_handler, catalogo_handler, criar_banner_handler, criar_curso_handler,
    criar_depoimento_handler, criar_lead_handler, diff_auditoria_handler, help_handler,
    listar_auditoria_handler, listar_banners_handler, listar_cursos_handler,
    listar_depoimentos_handler, listar_leads_handler, moderar_depoimento_handler,
    obter_curso_handler, remover_banner_handler, remover_curso_handler, upload_banner_handler,
};

/// Sobe a API. O CORS é permissivo porque o site e o painel rodam em
/// origens próprias e a autenticação fica no serviço hospedado.
pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .route("/help", web::get().to(help_handler))
            .route("/cursos", web::get().to(listar_cursos_handler))
            .route("/cursos/{id}", web::get().to(obter_curso_handler))
            .route("/catalogo", web::get().to(catalogo_handler))
            .route("/banners", web::get().to(listar_banners_handler))
            .route("/leads", web::post().to(criar_lead_handler))
            .route("/depoimentos", web::get().to(listar_depoimentos_handler))
            .route("/depoimentos", web::post().to(criar_depoimento_handler))
            .route("/admin/cursos", web::post().to(criar_curso_handler))
            .route("/admin/cursos/{id}", web::put().to(atualizar_curso_handler))
            .route("/admin/cursos/{id}", web::delete().to(remover_curso_handler))
            .route("/admin/banners", web::get().to(admin_listar_banners_handler))
            .route("/admin/banners", web::post().to(criar_banner_handler))
            .route("/admin/banners/upload", web::post().to(upload_banner_handler))
            .route("/admin/banners/{id}", web::put().to(atualizar_banner_handler))
            .route("/admin/banners/{id}", web::delete().to(remover_banner_handler))
            .route("/admin/leads", web::get().to(listar_leads_handler))
            .route("/admin/depoimentos", web::get().to(admin_listar_depoimentos_handler))
            .route(
                "/admin/depoimentos/{id}/status",
                web::put().to(moderar_depoimento_handler),
            )
            .route("/admin/auditoria", web::get().to(listar_auditoria_handler))
            .route("/admin/auditoria/{id}/diff", web::get().to(diff_auditoria_handler))
    })
    .workers(num_cpus::get())
    .bind(bind_addr)?
    .run()
    .await
}
